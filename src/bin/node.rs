use std::env;
use std::process;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use token_sssp::node::listener::NodeListener;
use token_sssp::{NodeAgent, NodeId};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Need exactly 1 argument: 'localhost:port'");
        eprintln!("Usage: token-sssp-node <host:port>");
        process::exit(1);
    }
    let id = NodeId::from(args[1].as_str());

    let listener = NodeListener::bind(id.addr()).await?;
    let agent = NodeAgent::new(id);
    tokio::spawn(listener.run(Arc::clone(&agent)));

    println!();
    println!("------------");
    println!("write 'edge host:port cost' to add an edge");
    println!("write 'Dijkstra' to run the algorithm with this node as the source");
    println!("------------");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Some(ShellCommand::Edge { remote, cost }) => {
                if !agent.register_edge(remote, cost).await {
                    println!("edge not created (remote unreachable)");
                }
            }
            Some(ShellCommand::Dijkstra) => {
                agent.start_run().await;
            }
            None => {}
        }
    }

    Ok(())
}

enum ShellCommand {
    Edge { remote: NodeId, cost: u64 },
    Dijkstra,
}

/// Parses one input line. Unrecognized or malformed lines yield `None` and
/// are ignored by the shell.
fn parse_command(line: &str) -> Option<ShellCommand> {
    let mut parts = line.split_whitespace();
    match parts.next()? {
        "edge" => {
            let remote = NodeId::from(parts.next()?);
            let cost = parts.next()?.parse::<u64>().ok()?;
            Some(ShellCommand::Edge { remote, cost })
        }
        "Dijkstra" => Some(ShellCommand::Dijkstra),
        _ => None,
    }
}
