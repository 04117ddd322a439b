use crate::app::AppContext;
use crate::cli::RegisterUserArgs;
use crate::ui;

pub fn handle_register_user(ctx: &AppContext, args: &RegisterUserArgs) -> anyhow::Result<()> {
    let mut catalog = ctx.open_catalog()?;
    let user_id = catalog.register_user(&args.name, &args.email, &args.phone)?;

    if ctx.quiet() {
        println!("{}", user_id);
        return Ok(());
    }
    let ui_ctx = ctx.ui(false)?;
    println!(
        "{}",
        ui::receipt(
            &ui_ctx,
            "User registered",
            &[("User ID", user_id.as_str()), ("Name", args.name.as_str())]
        )
    );
    Ok(())
}
