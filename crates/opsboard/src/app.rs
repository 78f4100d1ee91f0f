use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("opsboard")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Headless driver for the opsboard dashboard page layer")
        .long_about(
            "Opsboard wires the dashboard's client-side page components together without a \
             browser: it repairs stale client state, resolves sidebar navigation, and drives \
             the auto-refresh scheduler against the system-config API.",
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable log output (logs go to stderr as JSON)"),
        )
        .subcommand(
            Command::new("fix").about("Repair legacy avatar URLs in the client state store"),
        )
        .subcommand(Command::new("routes").about("List the routes the navigation router serves"))
        .subcommand(
            Command::new("resolve")
                .about("Resolve a menu label to its destination URL")
                .arg(
                    Arg::new("label")
                        .help("Menu label to resolve")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("document-path")
                        .long("document-path")
                        .help("Current document path (controls the context path, overrides config)"),
                ),
        )
        .subcommand(
            Command::new("watch")
                .about("Run a page session with auto-refresh and print its events")
                .arg(
                    Arg::new("base-url")
                        .long("base-url")
                        .help("System-config service base URL (overrides config)"),
                ),
        )
}
