//! atlas command line interface.
//!
//! Two subcommands mirror the two runtime phases: `generate` builds a
//! route table from the registered fixture domain and a source tree, and
//! `search` resolves inputs against a previously written map file. The
//! fixture registry from `atlas-test` serves as the composition root;
//! embedding applications would register their own units the same way.

use std::process;
use std::slice::Iter;

use atlas::prelude::*;
use atlas::serialize;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.first().map(String::as_str) {
        Some("generate") => cmd_generate(&args[1..]),
        Some("search") => cmd_search(&args[1..]),
        Some("help") | Some("--help") | Some("-h") | None => {
            print_usage();
            Ok(())
        }
        Some(other) => Err(format!("unknown command \"{other}\" (try \"atlas help\")")),
    };

    if let Err(message) = result {
        eprintln!("error: {message}");
        process::exit(1);
    }
}

fn print_usage() {
    println!(
        "atlas - route map generation and lookup

USAGE:
    atlas generate --path <DIR> --method <ACCESSOR> [OPTIONS]
    atlas search <MAPFILE> <INPUT> [--filter <KEY>]...
    atlas help

GENERATE OPTIONS:
    --path <DIR>           directory to scan for handler units (required)
    --method <ACCESSOR>    accessor supplying each unit's route key(s) (required)
    --namespace <NS>       namespace prepended to derived unit names
    --interface <CAP>      only include units declaring this capability
    --category <ACCESSOR>  nesting level accessor (repeatable, order matters)
    --filter <KEY=VALUE>   only include units whose accessor matches (repeatable)
    --format <json|ron>    output format (default: inferred from --out, else json)
    --out <FILE>           write the table here instead of stdout

SEARCH OPTIONS:
    --filter <KEY>         descend through this table key before searching
                           (repeatable, applied in order)"
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// generate
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_generate(args: &[String]) -> Result<(), String> {
    let mut path = None;
    let mut namespace = None;
    let mut method = None;
    let mut interface = None;
    let mut categories = Vec::new();
    let mut filters = Vec::new();
    let mut format = None;
    let mut out: Option<String> = None;

    let mut it = args.iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--path" => path = Some(expect_value(&mut it, "--path")?.to_owned()),
            "--namespace" => namespace = Some(expect_value(&mut it, "--namespace")?.to_owned()),
            "--method" => method = Some(expect_value(&mut it, "--method")?.to_owned()),
            "--interface" => interface = Some(expect_value(&mut it, "--interface")?.to_owned()),
            "--category" => categories.push(expect_value(&mut it, "--category")?.to_owned()),
            "--filter" => filters.push(parse_filter(expect_value(&mut it, "--filter")?)?),
            "--format" => {
                let raw = expect_value(&mut it, "--format")?;
                format = Some(raw.parse::<Format>().map_err(|e| e.to_string())?);
            }
            "--out" => out = Some(expect_value(&mut it, "--out")?.to_owned()),
            other => return Err(format!("unexpected argument \"{other}\"")),
        }
    }

    let path = path.ok_or("--path is required")?;
    let method = method.ok_or("--method is required")?;

    let registry = atlas_test::register(UnitRegistryBuilder::new()).build();
    let mut generator = MapGenerator::new(&registry).path(path).route_method(method);
    if let Some(namespace) = namespace {
        generator = generator.namespace(namespace);
    }
    if let Some(capability) = interface {
        generator = generator.interface(capability);
    }
    for category in categories {
        generator = generator.category(category);
    }
    for (key, expected) in filters {
        generator = generator.filter(key, expected);
    }
    if let Some(format) = format {
        generator = generator.format(format).map_err(|e| e.to_string())?;
    }
    if let Some(out) = &out {
        generator = generator.output_file(out).map_err(|e| e.to_string())?;
    }

    let table = generator.generate().map_err(|e| e.to_string())?;
    if out.is_none() {
        let format = format.unwrap_or(Format::Json);
        let text = serialize::encode(&table, format).map_err(|e| e.to_string())?;
        println!("{text}");
    }
    Ok(())
}

/// Parses a `key=value` filter. Values that read as integers or booleans
/// are typed accordingly so that loose comparison sees them as such.
fn parse_filter(raw: &str) -> Result<(String, KeyValue), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("filter \"{raw}\" is not of the form key=value"))?;
    let value = match value {
        "true" => KeyValue::Bool(true),
        "false" => KeyValue::Bool(false),
        other => match other.parse::<i64>() {
            Ok(n) => KeyValue::Int(n),
            Err(_) => KeyValue::from(other),
        },
    };
    Ok((key.to_owned(), value))
}

// ═══════════════════════════════════════════════════════════════════════════════
// search
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_search(args: &[String]) -> Result<(), String> {
    let mut positionals = Vec::new();
    let mut filters = Vec::new();

    let mut it = args.iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--filter" => filters.push(expect_value(&mut it, "--filter")?.to_owned()),
            other if other.starts_with("--") => {
                return Err(format!("unexpected argument \"{other}\""));
            }
            other => positionals.push(other.to_owned()),
        }
    }

    let [mapfile, input] = positionals.as_slice() else {
        return Err("search takes exactly two arguments: <MAPFILE> <INPUT>".to_owned());
    };

    let mut mapper = RouteMapper::from_file(mapfile).map_err(|e| e.to_string())?;
    for key in filters {
        mapper.filter(key);
    }

    match mapper.search(input) {
        Some(hit) => {
            println!("{}", hit.handler);
            let mut params: Vec<_> = hit.params.iter().collect();
            params.sort();
            for (name, value) in params {
                println!("{name} = {value}");
            }
            Ok(())
        }
        None => Err(format!("no route matched \"{input}\"")),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════════════

fn expect_value<'a>(it: &mut Iter<'a, String>, flag: &str) -> Result<&'a str, String> {
    it.next()
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
