//! CLI argument definitions using clap derive API

use clap::Parser;

/// dbmig - apply pending SQL migrations from dated directories
///
/// One invocation performs one full pass over `./migrations/<YYYYMM>/*.sql`
/// against the database named by MYSQL_HOST, MYSQL_ROOT_PASSWORD and
/// MYSQL_DATABASE. There are no flags that alter migration behavior.
#[derive(Parser, Debug)]
#[command(name = "dbmig")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose diagnostic output
    #[arg(short, long)]
    pub verbose: bool,
}
