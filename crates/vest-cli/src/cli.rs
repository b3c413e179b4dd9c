use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "vest",
    about = "Vest: inspect, simulate, and encode token lockups",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Summarize the release schedule of a deployment file
    Inspect(InspectArgs),
    /// Compute the claimable amount at a point in time
    Claimable(ClaimableArgs),
    /// Deploy in memory and claim at each given time
    Simulate(SimulateArgs),
    /// Produce hex-encoded message bodies
    Encode(EncodeArgs),
}

#[derive(Args)]
pub struct InspectArgs {
    pub config: PathBuf,
}

#[derive(Args)]
pub struct ClaimableArgs {
    pub config: PathBuf,
    /// Evaluation time, seconds since the epoch
    #[arg(long)]
    pub at: u64,
    /// Amount already claimed
    #[arg(long, default_value = "0")]
    pub claimed: u128,
}

#[derive(Args)]
pub struct SimulateArgs {
    pub config: PathBuf,
    /// Claim times, seconds since the epoch
    #[arg(long = "at", required = true, num_args = 1..)]
    pub times: Vec<u64>,
}

#[derive(Args)]
pub struct EncodeArgs {
    #[command(subcommand)]
    pub body: EncodeBody,
}

#[derive(Subcommand)]
pub enum EncodeBody {
    /// Claim operation
    Claim {
        #[arg(long, default_value = "0")]
        query_id: u64,
    },
    /// Admin service message
    ServiceMessage {
        /// Opaque payload, hex
        #[arg(long)]
        payload: String,
        /// Send mode flags
        #[arg(long)]
        mode: u8,
        #[arg(long, default_value = "0")]
        query_id: u64,
    },
    /// Deployment payload from a deployment file
    Deploy { config: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_inspect() {
        let cli = Cli::try_parse_from(["vest", "inspect", "lockup.toml"]).unwrap();
        if let Command::Inspect(args) = cli.command {
            assert_eq!(args.config, PathBuf::from("lockup.toml"));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_claimable() {
        let cli = Cli::try_parse_from(["vest", "claimable", "l.toml", "--at", "1700000000", "--claimed", "5"]).unwrap();
        if let Command::Claimable(args) = cli.command {
            assert_eq!(args.at, 1_700_000_000);
            assert_eq!(args.claimed, 5);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_claimable_defaults_claimed() {
        let cli = Cli::try_parse_from(["vest", "claimable", "l.toml", "--at", "1"]).unwrap();
        if let Command::Claimable(args) = cli.command {
            assert_eq!(args.claimed, 0);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_simulate_times() {
        let cli = Cli::try_parse_from(["vest", "simulate", "l.toml", "--at", "10", "20", "--at", "30"]).unwrap();
        if let Command::Simulate(args) = cli.command {
            assert_eq!(args.times, vec![10, 20, 30]);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn simulate_requires_times() {
        assert!(Cli::try_parse_from(["vest", "simulate", "l.toml"]).is_err());
    }

    #[test]
    fn parse_encode_service_message() {
        let cli = Cli::try_parse_from(["vest", "encode", "service-message", "--payload", "beef", "--mode", "160"]).unwrap();
        if let Command::Encode(EncodeArgs { body: EncodeBody::ServiceMessage { payload, mode, query_id } }) = cli.command {
            assert_eq!(payload, "beef");
            assert_eq!(mode, 160);
            assert_eq!(query_id, 0);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_encode_claim() {
        let cli = Cli::try_parse_from(["vest", "encode", "claim", "--query-id", "9"]).unwrap();
        assert!(matches!(cli.command, Command::Encode(EncodeArgs { body: EncodeBody::Claim { query_id: 9 } })));
    }

    #[test]
    fn parse_verbose_and_json() {
        let cli = Cli::try_parse_from(["vest", "--verbose", "--format", "json", "inspect", "l.toml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Json);
    }
}
