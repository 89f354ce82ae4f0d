use validator::Validate;

use crate::{
    args::RegisterArgs,
    forms::{validation_message, RegisterForm},
    web_client::Client,
};

/// Create an account. Input is validated locally before any request is sent;
/// the service's response text (success or rejection) is relayed verbatim.
pub fn register_cmd(client: &dyn Client, args: RegisterArgs) -> anyhow::Result<()> {
    let form = RegisterForm {
        username: args.username,
        password: args.password,
        display_name: args.display_name,
        email: args.email,
        phone: args.phone,
    };

    if let Err(errors) = form.validate() {
        anyhow::bail!("{}", validation_message(&errors));
    }

    let message = client
        .register(
            &form.username,
            &form.password,
            &form.display_name,
            &form.email,
            &form.phone,
        )
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    println!("{message}");

    Ok(())
}
