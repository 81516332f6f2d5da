use clap::{Arg, Command};

fn sort_arg(id: &'static str, long: &'static str) -> Arg {
    Arg::new(id)
        .long(long)
        .help("date-desc, date-asc, id-desc, id-asc, price-desc or price-asc")
        .default_value("date-desc")
}

fn paid_arg(id: &'static str, long: &'static str) -> Arg {
    Arg::new(id)
        .long(long)
        .value_parser(["all", "paid", "unpaid"])
        .default_value("all")
}

#[must_use]
pub fn command() -> Command {
    Command::new("orders")
        .about("Inspect and progress the order queue")
        .subcommand_required(true)
        .subcommand(
            Command::new("list")
                .about("Show active and completed orders")
                .arg(sort_arg("active-sort", "active-sort"))
                .arg(
                    Arg::new("status")
                        .long("status")
                        .help("Only active orders with this status"),
                )
                .arg(paid_arg("paid", "paid"))
                .arg(Arg::new("id").long("id").help("Only active orders whose id contains this"))
                .arg(sort_arg("completed-sort", "completed-sort"))
                .arg(paid_arg("completed-paid", "completed-paid"))
                .arg(
                    Arg::new("completed-id")
                        .long("completed-id")
                        .help("Only completed orders whose id contains this"),
                ),
        )
        .subcommand(
            Command::new("show")
                .about("Show one order in full")
                .arg(Arg::new("id").required(true).value_parser(clap::value_parser!(i64))),
        )
        .subcommand(
            Command::new("status")
                .about("Move an order to a new status")
                .arg(Arg::new("id").required(true).value_parser(clap::value_parser!(i64)))
                .arg(
                    Arg::new("status")
                        .required(true)
                        .value_parser(["ordered", "processing", "delivering", "completed"]),
                ),
        )
        .subcommand(
            Command::new("watch")
                .about("Keep the active orders on screen, refreshing periodically")
                .arg(
                    Arg::new("interval")
                        .long("interval")
                        .help("Seconds between refreshes (default from config)")
                        .value_parser(clap::value_parser!(u64).range(1..)),
                ),
        )
}
