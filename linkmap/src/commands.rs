use crate::CLAP_STYLING;
use clap::{arg, command};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("linkmap")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("linkmap")
        .styles(CLAP_STYLING)
        .subcommand_required(true)
        .subcommand(
            command!("graph")
                .about(
                    "Draw the community structure of the pages matching a search term \
                as an interactive HTML figure.",
                )
                .arg(
                    arg!(-s --"search-term" <TERM>)
                        .required(false)
                        .help("Keep only pages whose URL contains this substring")
                        .default_value("childcare"),
                )
                .arg(
                    arg!(-a --"algorithm" <NAME>)
                        .required(false)
                        .help("Community detection algorithm")
                        .value_parser([
                            "label_propagation",
                            "spinglass",
                            "infomap",
                            "leading_eigenvector",
                        ])
                        .default_value("label_propagation"),
                )
                .arg(
                    arg!(-c --"community" <ID>)
                        .required(false)
                        .help("Zoom into a single community (negative shows all)")
                        .value_parser(clap::value_parser!(i64))
                        .allow_hyphen_values(true)
                        .default_value("-1"),
                )
                .arg(
                    arg!(--"display-centrality")
                        .required(false)
                        .help("Overlay each page's out-degree on its marker")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"seed" <SEED>)
                        .required(false)
                        .help("Seed for community detection and layout")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("2000"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Where to write the HTML figure")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .default_value("linkmap.html"),
                )
                .arg(
                    arg!(-d --"data-dir" <PATH>)
                        .required(false)
                        .help("Directory holding the edge list CSV (default: $DIR_DATA_RAW)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                ),
        )
        .subcommand(
            command!("top")
                .about("Rank the pages matching a search term by a centrality measure.")
                .arg(
                    arg!(-s --"search-term" <TERM>)
                        .required(false)
                        .help("Keep only pages whose URL contains this substring")
                        .default_value("childcare"),
                )
                .arg(
                    arg!(-m --"measure" <NAME>)
                        .required(false)
                        .help("Centrality measure to rank by")
                        .value_parser(["degree", "betweenness", "pagerank"])
                        .default_value("degree"),
                )
                .arg(
                    arg!(-n --"count" <NUM>)
                        .required(false)
                        .help("How many pages to show")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("10"),
                )
                .arg(
                    arg!(-d --"data-dir" <PATH>)
                        .required(false)
                        .help("Directory holding the edge list CSV (default: $DIR_DATA_RAW)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                ),
        )
        .subcommand(
            command!("search")
                .about("Query the GOV.UK Search API and list matching pages with scores.")
                .arg(arg!(<TERM>).required(true).help("Search term"))
                .arg(
                    arg!(-n --"count" <NUM>)
                        .required(false)
                        .help("How many results to request")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("10"),
                ),
        )
}
