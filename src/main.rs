use anyhow::Result;
use clap::Parser;

use hostnet::{ip_address_of_hostname, list_interfaces, local_hostname, AddressPreference};

/// Report the host's network interfaces and addresses.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Prefer IPv6 over IPv4 when picking the primary address
    #[arg(short = '6', long)]
    prefer_ipv6: bool,

    /// Print the interface table as JSON
    #[arg(long)]
    json: bool,

    /// Hostnames to resolve in addition to the local report
    hostnames: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let preference = if cli.prefer_ipv6 {
        AddressPreference::PreferIpv6
    } else {
        AddressPreference::PreferIpv4
    };

    let table = list_interfaces();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else {
        println!("hostname: {}", local_hostname());
        match table.preferred(preference) {
            Some(address) => println!("primary address: {}", address),
            None => println!("primary address: none (no active non-loopback interface)"),
        }
        for (name, addresses) in table.by_interface() {
            println!("  {}: {}", name, addresses.join(", "));
        }
    }

    for hostname in &cli.hostnames {
        match ip_address_of_hostname(hostname) {
            Ok(address) => println!("{} -> {}", hostname, address),
            Err(err) => log::error!("{}", err),
        }
    }

    Ok(())
}
