pub mod auth;
pub mod dishes;
pub mod orders;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ArgAction, ColorChoice, Command,
};
use yume_admin_core::config::{ENV_API_URL, ENV_REFRESH_ON_FORBIDDEN};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_CREDENTIAL_BACKEND: &str = "credential-backend";
pub const ARG_REFRESH_ON_FORBIDDEN: &str = "refresh-on-forbidden";
pub const ARG_VERBOSITY: &str = "verbosity";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("yume-admin")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_API_URL)
                .long("api-url")
                .help("Backend base URL, e.g. https://yume-api.example/")
                .env(ENV_API_URL)
                .global(true),
        )
        .arg(
            Arg::new(ARG_CREDENTIAL_BACKEND)
                .long("credential-backend")
                .help("Where the session tokens are kept")
                .env("YUME_CREDENTIAL_BACKEND")
                .value_parser(["file", "keyring", "memory"])
                .global(true),
        )
        .arg(
            Arg::new(ARG_REFRESH_ON_FORBIDDEN)
                .long("refresh-on-forbidden")
                .help("Treat 403 responses as an expired token and try to refresh")
                .env(ENV_REFRESH_ON_FORBIDDEN)
                .value_parser(clap::builder::BoolishValueParser::new())
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new(ARG_VERBOSITY)
                .short('v')
                .long("verbose")
                .help("Increase log output: -v info, -vv debug, -vvv trace (RUST_LOG wins when set)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(auth::login())
        .subcommand(auth::logout())
        .subcommand(auth::signup())
        .subcommand(orders::command())
        .subcommand(dishes::command())
        .subcommand(Command::new("stats").about("Show order totals and earnings for the last six months"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();
        assert_eq!(command.get_name(), "yume-admin");
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
        command.debug_assert();
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let matches = new().get_matches_from(vec![
            "yume-admin",
            "stats",
            "--api-url",
            "http://127.0.0.1:9000/",
            "-vv",
        ]);
        assert_eq!(
            matches.get_one::<String>(ARG_API_URL).cloned(),
            Some("http://127.0.0.1:9000/".to_string())
        );
        assert_eq!(matches.get_count(ARG_VERBOSITY), 2);
        assert_eq!(matches.subcommand_name(), Some("stats"));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(new().try_get_matches_from(vec!["yume-admin"]).is_err());
    }
}
