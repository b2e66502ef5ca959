use crate::demo::{run_audit, run_demo, run_rules, AuditArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use deal_audit::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Deal Audit",
    about = "Audit programmatic deals for launch readiness from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Audit a deal record stored as JSON
    Audit(AuditArgs),
    /// Print the active audit policy as JSON
    Rules,
    /// Audit a built-in sample deal and render the result
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Audit(args) => run_audit(args),
        Command::Rules => run_rules(),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["deal-audit-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_audit_arguments() {
        let cli = Cli::try_parse_from(["deal-audit-api", "audit", "--deal", "deal.json", "--json"])
            .expect("parses");
        match cli.command {
            Some(Command::Audit(args)) => {
                assert_eq!(args.deal, std::path::PathBuf::from("deal.json"));
                assert!(args.json);
            }
            other => panic!("expected audit command, got {other:?}"),
        }
    }

    #[test]
    fn audit_requires_a_deal_file() {
        assert!(Cli::try_parse_from(["deal-audit-api", "audit"]).is_err());
    }
}
