use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::ArgMatches;
use yume_admin_core::dashboard::{OrderFilter, OrderSort};
use yume_admin_core::models::OrderStatus;

use crate::cli::actions::auth::{LoginArgs, SignupArgs};
use crate::cli::actions::dishes::{DishFields, DishesAction};
use crate::cli::actions::orders::{ListArgs, OrdersAction};
use crate::cli::actions::Action;

fn string(matches: &ArgMatches, id: &str) -> Option<String> {
    matches.get_one::<String>(id).cloned()
}

fn required(matches: &ArgMatches, id: &str) -> Result<String> {
    string(matches, id).with_context(|| format!("missing required argument: --{}", id))
}

fn paid_filter(matches: &ArgMatches, id: &str) -> Option<bool> {
    match matches.get_one::<String>(id).map(String::as_str) {
        Some("paid") => Some(true),
        Some("unpaid") => Some(false),
        _ => None,
    }
}

fn sort(matches: &ArgMatches, id: &str) -> Result<OrderSort> {
    match matches.get_one::<String>(id) {
        Some(value) => value.parse().map_err(|e: String| anyhow!(e)),
        None => Ok(OrderSort::default()),
    }
}

fn id_arg(matches: &ArgMatches) -> Result<i64> {
    matches
        .get_one::<i64>("id")
        .copied()
        .context("missing required argument: <id>")
}

fn list_args(matches: &ArgMatches) -> Result<ListArgs> {
    let status = match matches.get_one::<String>("status") {
        Some(value) => Some(value.parse::<OrderStatus>().map_err(|e| anyhow!(e))?),
        None => None,
    };
    Ok(ListArgs {
        active_filter: OrderFilter {
            id_query: string(matches, "id").unwrap_or_default(),
            status,
            paid: paid_filter(matches, "paid"),
        },
        active_sort: sort(matches, "active-sort")?,
        completed_filter: OrderFilter {
            id_query: string(matches, "completed-id").unwrap_or_default(),
            status: None,
            paid: paid_filter(matches, "completed-paid"),
        },
        completed_sort: sort(matches, "completed-sort")?,
    })
}

fn orders(matches: &ArgMatches) -> Result<OrdersAction> {
    match matches.subcommand() {
        Some(("list", m)) => Ok(OrdersAction::List(list_args(m)?)),
        Some(("show", m)) => Ok(OrdersAction::Show { id: id_arg(m)? }),
        Some(("status", m)) => {
            let status = required(m, "status")?
                .parse::<OrderStatus>()
                .map_err(|e| anyhow!(e))?;
            Ok(OrdersAction::SetStatus {
                id: id_arg(m)?,
                status,
            })
        }
        Some(("watch", m)) => Ok(OrdersAction::Watch {
            interval_secs: m.get_one::<u64>("interval").copied(),
        }),
        _ => bail!("unknown orders command"),
    }
}

fn dish_fields(matches: &ArgMatches) -> DishFields {
    DishFields {
        name: string(matches, "name"),
        price: matches.get_one::<f64>("price").copied(),
        ingredients: string(matches, "ingredients"),
        image: string(matches, "image").map(PathBuf::from),
    }
}

fn dishes(matches: &ArgMatches) -> Result<DishesAction> {
    match matches.subcommand() {
        Some(("list", _)) => Ok(DishesAction::List),
        Some(("add", m)) => Ok(DishesAction::Add(dish_fields(m))),
        Some(("edit", m)) => Ok(DishesAction::Edit {
            id: id_arg(m)?,
            fields: dish_fields(m),
        }),
        Some(("delete", m)) => Ok(DishesAction::Delete {
            id: id_arg(m)?,
            confirmed: m.get_flag("yes"),
        }),
        _ => bail!("unknown dishes command"),
    }
}

/// Map parsed arguments to the action to run.
///
/// # Errors
/// Returns an error if an argument value cannot be interpreted.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some(("login", m)) => Ok(Action::Login(LoginArgs {
            email: string(m, "email"),
        })),
        Some(("logout", _)) => Ok(Action::Logout),
        Some(("signup", m)) => Ok(Action::Signup(SignupArgs {
            first_name: required(m, "first-name")?,
            last_name: required(m, "last-name")?,
            email: required(m, "email")?,
            phone: string(m, "phone").unwrap_or_default(),
            address: string(m, "address").unwrap_or_default(),
        })),
        Some(("orders", m)) => Ok(Action::Orders(orders(m)?)),
        Some(("dishes", m)) => Ok(Action::Dishes(dishes(m)?)),
        Some(("stats", _)) => Ok(Action::Stats),
        _ => bail!("unknown command"),
    }
}
