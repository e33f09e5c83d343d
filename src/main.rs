use std::io::Read;

use clap::{Arg, ArgMatches, Command};
use pastecurl::{RequestData, curl::ParsedCommand, parse};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CurlPart {
    Method,
    Header,
    Param,
    Data,
    Url,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Debug,
    Json,
}

fn command_arg() -> Arg {
    Arg::new("command")
        .help("The input curl command string, or - to read it from stdin")
        .required(true)
        .index(1)
}

fn cli() -> Command {
    Command::new("pastecurl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A CLI tool to turn curl commands into request descriptors")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("parse")
                .about("Parses a curl command")
                .arg(command_arg())
                .arg(
                    Arg::new("part")
                        .short('p')
                        .long("part")
                        .value_name("PART")
                        .help("Prints one part of the command (method, header, param, data, url)")
                        .required(false)
                        .value_parser(clap::value_parser!(CurlPart)),
                )
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .value_name("FORMAT")
                        .help("Output format")
                        .default_value("debug")
                        .value_parser(clap::value_parser!(OutputFormat)),
                ),
        )
        .subcommand(
            Command::new("request")
                .about("Converts a curl command into a request builder form, as JSON")
                .arg(command_arg()),
        )
}

fn read_command(matches: &ArgMatches) -> pastecurl::Result<String> {
    let command = matches
        .get_one::<String>("command")
        .cloned()
        .unwrap_or_default();
    if command != "-" {
        return Ok(command);
    }
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn print_part(
    parsed: &ParsedCommand,
    part: CurlPart,
    format: OutputFormat,
) -> serde_json::Result<()> {
    let value = match part {
        CurlPart::Method => serde_json::to_value(&parsed.method)?,
        CurlPart::Header => serde_json::to_value(&parsed.headers)?,
        CurlPart::Param => serde_json::to_value(&parsed.params)?,
        CurlPart::Data => serde_json::to_value(&parsed.data)?,
        CurlPart::Url => serde_json::to_value(&parsed.url)?,
    };
    match (format, part) {
        (OutputFormat::Json, _) => println!("{value}"),
        (OutputFormat::Debug, CurlPart::Header) => {
            parsed.headers.iter().for_each(|h| println!("{h:?}"))
        }
        (OutputFormat::Debug, CurlPart::Param) => {
            parsed.params.iter().for_each(|p| println!("{p:?}"))
        }
        (OutputFormat::Debug, _) => println!("{value}"),
    }
    Ok(())
}

fn run(matches: ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    match matches.subcommand() {
        Some(("parse", sub_matches)) => {
            let parsed = parse(&read_command(sub_matches)?);
            let format = sub_matches
                .get_one::<OutputFormat>("format")
                .copied()
                .unwrap_or_default();

            match (sub_matches.get_one::<CurlPart>("part"), format) {
                (Some(part), _) => print_part(&parsed, *part, format)?,
                (None, OutputFormat::Json) => {
                    println!("{}", serde_json::to_string_pretty(&parsed)?)
                }
                (None, OutputFormat::Debug) => println!("{:#?}", parsed),
            }
        }
        Some(("request", sub_matches)) => {
            let request = RequestData::try_from(parse(&read_command(sub_matches)?))?;
            println!("{}", serde_json::to_string_pretty(&request)?);
        }
        _ => {
            cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(cli().get_matches()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn test_parse_subcommand_args() {
        let matches = cli()
            .try_get_matches_from([
                "pastecurl",
                "parse",
                "curl https://x.test",
                "-p",
                "url",
                "-f",
                "json",
            ])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!("parse", name);
        assert_eq!(Some(&CurlPart::Url), sub.get_one::<CurlPart>("part"));
        assert_eq!(Some(&OutputFormat::Json), sub.get_one::<OutputFormat>("format"));
        assert_eq!("curl https://x.test", read_command(sub).unwrap());
    }
}
