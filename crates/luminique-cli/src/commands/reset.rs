use super::{CmdResult, Context};

pub fn run(ctx: &Context, yes: bool) -> CmdResult {
    if !yes {
        return Err("refusing to erase progress without --yes".into());
    }
    let mut session = ctx.session()?;
    session.reset()?;
    println!("all progress reset");
    Ok(())
}
