// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, command};

fn quote_arg() -> Arg {
    Arg::new("quote")
        .required(true)
        .help("Quotation id or number (e.g. MQ-2025-0001)")
}

fn item_arg() -> Arg {
    Arg::new("item")
        .required(true)
        .help("Item id, unique id prefix, or 1-based position")
}

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    ]
}

fn item_field_args() -> Vec<Arg> {
    vec![
        Arg::new("category").long("category").help("Grouping, e.g. 'Kitchen Base Units'"),
        Arg::new("name").long("name"),
        Arg::new("description").long("description"),
        Arg::new("quantity").long("quantity").short('q'),
        Arg::new("unit")
            .long("unit")
            .help("Nos | Sq.Ft | R.Ft | Mtr | Set"),
        Arg::new("rate").long("rate").short('r'),
        Arg::new("dims")
            .long("dims")
            .help("Dimensions as LxHxD, e.g. 1200x600x560"),
    ]
}

fn customer_args() -> Vec<Arg> {
    vec![
        Arg::new("customer").long("customer").help("Customer name"),
        Arg::new("email").long("email"),
        Arg::new("phone").long("phone"),
        Arg::new("address").long("address"),
        Arg::new("notes").long("notes"),
        Arg::new("discount").long("discount").help("Flat discount amount"),
        Arg::new("tax_rate").long("tax-rate").help("Tax percentage"),
    ]
}

pub fn build_cli() -> Command {
    command!()
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("More log output (-v info, -vv debug)"),
        )
        .subcommand(Command::new("init").about("Create the local database"))
        .subcommand(
            Command::new("quote")
                .about("Create, list and edit quotations")
                .subcommand(
                    Command::new("new")
                        .about("Start a new draft quotation")
                        .args(customer_args())
                        .arg(Arg::new("date").long("date").help("Issue date YYYY-MM-DD")),
                )
                .subcommand(Command::new("list").about("Dashboard of quotations").args(json_args()))
                .subcommand(
                    Command::new("show")
                        .about("Show one quotation")
                        .arg(quote_arg())
                        .arg(
                            Arg::new("json")
                                .long("json")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(
                    Command::new("set")
                        .about("Update customer, terms, status or pricing fields")
                        .arg(quote_arg())
                        .args(customer_args())
                        .arg(Arg::new("status").long("status").help("draft|sent|approved|paid"))
                        .arg(Arg::new("date").long("date").help("Issue date YYYY-MM-DD"))
                        .arg(
                            Arg::new("valid_until")
                                .long("valid-until")
                                .help("Validity date YYYY-MM-DD"),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a quotation")
                        .arg(quote_arg()),
                ),
        )
        .subcommand(
            Command::new("item")
                .about("Line items of a quotation")
                .subcommand(
                    Command::new("add")
                        .about("Append a line item")
                        .arg(quote_arg())
                        .args(item_field_args()),
                )
                .subcommand(
                    Command::new("set")
                        .about("Change fields of a line item")
                        .arg(quote_arg())
                        .arg(item_arg())
                        .args(item_field_args())
                        .arg(
                            Arg::new("clear_dims")
                                .long("clear-dims")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("dims"),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove a line item")
                        .arg(quote_arg())
                        .arg(item_arg()),
                )
                .subcommand(
                    Command::new("list")
                        .about("List line items")
                        .arg(quote_arg())
                        .args(json_args()),
                ),
        )
        .subcommand(
            Command::new("render")
                .about("Render the print-ready document")
                .arg(quote_arg())
                .arg(Arg::new("out").long("out").help("Write to file instead of stdout")),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("quote")
                        .about("Export one quotation as json or csv")
                        .arg(quote_arg())
                        .arg(Arg::new("format").long("format").required(true))
                        .arg(Arg::new("out").long("out").required(true)),
                )
                .subcommand(
                    Command::new("quotes")
                        .about("Export every quotation as a JSON array")
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Import data")
                .subcommand(
                    Command::new("items")
                        .about("Append line items from CSV")
                        .arg(Arg::new("quote").long("quote").required(true))
                        .arg(Arg::new("path").long("path").required(true)),
                ),
        )
        .subcommand(
            Command::new("ai")
                .about("Generative text helpers")
                .subcommand(
                    Command::new("cover-letter")
                        .about("Draft a cover letter for a quotation")
                        .arg(quote_arg())
                        .arg(Arg::new("out").long("out")),
                )
                .subcommand(
                    Command::new("describe")
                        .about("Write a specification for an item and store it as its description")
                        .arg(quote_arg())
                        .arg(item_arg())
                        .arg(
                            Arg::new("dry_run")
                                .long("dry-run")
                                .action(ArgAction::SetTrue)
                                .help("Print only, do not update the item"),
                        ),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Settings")
                .subcommand(Command::new("show").about("Show effective settings"))
                .subcommand(
                    Command::new("set")
                        .about("Change a setting")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored quotations for inconsistencies"))
}
