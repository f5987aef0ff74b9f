use anyhow::{anyhow, Context, Result};
use clap::{arg, ArgAction, Command};
use gen8_instances::{save_gen8, write_gen8, DenseGraph, GeneratorConfig, Instance};
use std::{fs, io::Read, path::PathBuf};

fn cli() -> Command {
    Command::new("gen8-runtime")
        .about("Generates CVRPTW instances and exports solver and model inputs")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("generate_instance")
                .about("Generates instances")
                .arg(
                    arg!(<NUM_NODES> "Number of customer nodes")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(<RAND_HASH> "A string used in seed generation")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(arg!(<NONCE> "Nonce value").value_parser(clap::value_parser!(u64)))
                .arg(
                    arg!(--count [COUNT] "Number of instances to generate")
                        .default_value("1")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--config [CONFIG] "Generator config json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, instances are saved to this file path as json")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("export_gen8")
                .about("Renders an instance as a Gen8 benchmark file")
                .arg(
                    arg!(<INSTANCE> "Instance json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the Gen8 text is saved to this file path")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("export_graph")
                .about("Builds the dense graph encoding of an instance")
                .arg(
                    arg!(<INSTANCE> "Instance json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--normalize "Divide node features by capacity and time features by scale")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    arg!(--scale [SCALE] "Divisor for edge and time features when normalizing")
                        .default_value("1000")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the graph is saved to this file path as json")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
}

fn main() {
    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("generate_instance", sub_m)) => generate_instance(
            *sub_m.get_one::<usize>("NUM_NODES").unwrap(),
            sub_m.get_one::<String>("RAND_HASH").unwrap().clone(),
            *sub_m.get_one::<u64>("NONCE").unwrap(),
            *sub_m.get_one::<usize>("count").unwrap(),
            sub_m.get_one::<String>("config").cloned(),
            sub_m.get_one::<PathBuf>("output").cloned(),
        ),
        Some(("export_gen8", sub_m)) => export_gen8(
            sub_m.get_one::<String>("INSTANCE").unwrap().clone(),
            sub_m.get_one::<PathBuf>("output").cloned(),
        ),
        Some(("export_graph", sub_m)) => export_graph(
            sub_m.get_one::<String>("INSTANCE").unwrap().clone(),
            *sub_m.get_one::<bool>("normalize").unwrap(),
            *sub_m.get_one::<f64>("scale").unwrap(),
            sub_m.get_one::<PathBuf>("output").cloned(),
        ),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn generate_instance(
    num_nodes: usize,
    rand_hash: String,
    nonce: u64,
    count: usize,
    config: Option<String>,
    output_file: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config)?;
    let seed = calc_seed(&rand_hash, nonce);
    let instances = Instance::generate_batch(&seed, num_nodes, count, &config)?;
    let json = serde_json::to_string(&instances)?;
    match output_file {
        Some(path) => {
            fs::write(&path, json)?;
            println!("instances written to: {:?}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn export_gen8(instance: String, output_file: Option<PathBuf>) -> Result<()> {
    let instance = load_instance(&instance)?;
    match output_file {
        Some(path) => {
            save_gen8(&instance, &path)?;
            println!("gen8 file written to: {:?}", path);
        }
        None => {
            let mut buffer = Vec::new();
            write_gen8(&instance, &mut buffer)?;
            print!("{}", String::from_utf8(buffer)?);
        }
    }
    Ok(())
}

fn export_graph(
    instance: String,
    normalize: bool,
    scale: f64,
    output_file: Option<PathBuf>,
) -> Result<()> {
    let instance = load_instance(&instance)?;
    let graph = DenseGraph::from_instance(&instance, normalize, scale)?;
    let json = serde_json::to_string(&graph)?;
    match output_file {
        Some(path) => {
            fs::write(&path, json)?;
            println!("graph written to: {:?}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}

pub fn calc_seed(rand_hash: &str, nonce: u64) -> [u8; 32] {
    blake3::hash(format!("{}_{}", rand_hash, nonce).as_bytes()).into()
}

fn load_config(config: Option<String>) -> Result<GeneratorConfig> {
    let Some(config) = config else {
        return Ok(GeneratorConfig::default());
    };
    let config = if config.ends_with(".json") {
        fs::read_to_string(&config).with_context(|| format!("Failed to read config file: {}", config))?
    } else {
        config
    };
    serde_json::from_str(&config).context("Failed to parse config")
}

fn load_instance(instance: &str) -> Result<Instance> {
    let instance = if instance == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read instance from stdin")?;
        buffer
    } else if instance.ends_with(".json") {
        fs::read_to_string(instance)
            .with_context(|| format!("Failed to read instance file: {}", instance))?
    } else {
        instance.to_string()
    };
    serde_json::from_str(&instance).context("Failed to parse instance")
}
