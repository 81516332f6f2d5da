use clap::{Arg, Command};

#[must_use]
pub fn login() -> Command {
    Command::new("login")
        .about("Sign in with an administrator account")
        .arg(
            Arg::new("email")
                .short('e')
                .long("email")
                .help("Account email; defaults to the last one used")
                .env("YUME_EMAIL"),
        )
}

#[must_use]
pub fn logout() -> Command {
    Command::new("logout").about("Revoke the session and forget the stored tokens")
}

#[must_use]
pub fn signup() -> Command {
    Command::new("signup")
        .about("Create a customer account (password is prompted for)")
        .arg(Arg::new("first-name").long("first-name").required(true))
        .arg(Arg::new("last-name").long("last-name").required(true))
        .arg(Arg::new("email").long("email").required(true))
        .arg(Arg::new("phone").long("phone"))
        .arg(Arg::new("address").long("address"))
}
