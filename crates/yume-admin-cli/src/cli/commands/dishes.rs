use clap::{Arg, ArgAction, Command};

fn price_arg() -> Arg {
    Arg::new("price")
        .long("price")
        .value_parser(clap::value_parser!(f64))
}

#[must_use]
pub fn command() -> Command {
    Command::new("dishes")
        .about("Manage the menu")
        .subcommand_required(true)
        .subcommand(Command::new("list").about("List every dish on the menu"))
        .subcommand(
            Command::new("add")
                .about("Add a dish")
                .arg(Arg::new("name").long("name").required(true))
                .arg(price_arg().required(true))
                .arg(Arg::new("ingredients").long("ingredients"))
                .arg(
                    Arg::new("image")
                        .long("image")
                        .help("Path to the dish photo")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("edit")
                .about("Change a dish; omitted fields keep their current value")
                .arg(Arg::new("id").required(true).value_parser(clap::value_parser!(i64)))
                .arg(Arg::new("name").long("name"))
                .arg(price_arg())
                .arg(Arg::new("ingredients").long("ingredients"))
                .arg(Arg::new("image").long("image").help("Path to a replacement photo")),
        )
        .subcommand(
            Command::new("delete")
                .about("Remove a dish")
                .arg(Arg::new("id").required(true).value_parser(clap::value_parser!(i64)))
                .arg(
                    Arg::new("yes")
                        .short('y')
                        .long("yes")
                        .help("Do not ask for confirmation")
                        .action(ArgAction::SetTrue),
                ),
        )
}
