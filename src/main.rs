use anyhow::Result;
use clap::{Parser, Subcommand};
use kit::areas::repository::{RepoLock, Repository};
use kit::artifacts::safety::repo_path::KIT_DIR;
use kit::commands::porcelain::reset::ResetMode;
use kit::errors::KitError;

#[derive(Parser)]
#[command(
    name = "kit",
    version = "0.1.0",
    about = "A simple content-tracking version control tool",
    long_about = "This is a simple content-tracking version control tool, written in Rust. \
    It stores snapshots of a working tree in a content-addressable object database \
    and keeps a staging index between the working tree and commits.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "add",
        about = "Stage files for the next commit",
        long_about = "This command hashes the given files into the object database and records \
        them in the staging index. Directories are expanded recursively."
    )]
    Add {
        #[arg(index = 1, required = true, help = "The files or directories to stage")]
        paths: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command creates a new commit from the staging index with the specified commit message."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "branch",
        about = "Create or list branches",
        long_about = "With a name this command creates a branch pointing at the current HEAD commit. \
        Without arguments it lists all branches, marking the current one."
    )]
    Branch {
        #[arg(index = 1, help = "The name of the branch to create")]
        name: Option<String>,
    },
    #[command(
        name = "checkout",
        about = "Switch branches or detach HEAD at a commit",
        long_about = "This command switches the working tree, index and HEAD to the given branch \
        or commit. Uncommitted local changes that would be overwritten block the switch."
    )]
    Checkout {
        #[arg(short = 'b', help = "Create a new branch with the given name and switch to it")]
        create_branch: bool,
        #[arg(index = 1, help = "The branch or revision to check out")]
        target: String,
    },
    #[command(
        name = "rm",
        about = "Remove files from the index and working tree",
        long_about = "This command deletes the given tracked files from the working tree and \
        removes them from the staging index."
    )]
    Rm {
        #[arg(short, long, help = "Remove even when the file has uncommitted changes")]
        force: bool,
        #[arg(index = 1, required = true, help = "The tracked files to remove")]
        paths: Vec<String>,
    },
    #[command(
        name = "reset",
        about = "Move HEAD to another commit",
        long_about = "This command moves the current branch to the given revision. With --mixed \
        (the default) the index is reset as well; with --hard the working tree too; --soft moves HEAD only."
    )]
    Reset {
        #[arg(long, conflicts_with_all = ["mixed", "hard"], help = "Move HEAD only")]
        soft: bool,
        #[arg(long, conflicts_with = "hard", help = "Move HEAD and reset the index")]
        mixed: bool,
        #[arg(long, help = "Move HEAD and reset the index and working tree")]
        hard: bool,
        #[arg(index = 1, help = "The revision to reset to")]
        args: Vec<String>,
    },
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command prints the content of an object in the repository. \
        It requires the SHA of the object to be specified."
    )]
    CatFile {
        #[arg(short = 'p', long, help = "The object SHA to print")]
        sha: String,
    },
    #[command(
        name = "hash-object",
        about = "Hash an object and optionally write it to the object database",
        long_about = "This command hashes an object file and can write it to the object database. \
        It requires the path to the file to be specified."
    )]
    HashObject {
        #[arg(
            short,
            long,
            required = false,
            help = "Write the object to the object database"
        )]
        write: bool,
        #[arg(index = 1)]
        file: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => {
            let mut repository = match path {
                Some(path) => Repository::new(path, Box::new(std::io::stdout()))?,
                None => {
                    let pwd = std::env::current_dir()?;
                    Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?
                }
            };

            repository.init().await?
        }
        Commands::Add { paths } => {
            let mut repository = current_repository()?;
            let _lock = RepoLock::acquire(&repository.kit_path())?;

            repository.add(paths).await?
        }
        Commands::Commit { message } => {
            let mut repository = current_repository()?;
            let _lock = RepoLock::acquire(&repository.kit_path())?;

            repository.commit(message.as_str()).await?
        }
        Commands::Branch { name } => {
            let mut repository = current_repository()?;
            let _lock = RepoLock::acquire(&repository.kit_path())?;

            repository.branch(name.as_deref()).await?
        }
        Commands::Checkout {
            create_branch,
            target,
        } => {
            let mut repository = current_repository()?;
            let _lock = RepoLock::acquire(&repository.kit_path())?;

            repository.checkout(target, *create_branch).await?
        }
        Commands::Rm { force, paths } => {
            let mut repository = current_repository()?;
            let _lock = RepoLock::acquire(&repository.kit_path())?;

            repository.rm(paths, *force).await?
        }
        Commands::Reset {
            soft,
            mixed,
            hard,
            args,
        } => {
            let target = match args.as_slice() {
                [target] => target,
                [] => reset_usage_error("missing target revision"),
                _ => reset_usage_error("too many arguments"),
            };
            let mode = match (*soft, *mixed, *hard) {
                (true, _, _) => ResetMode::Soft,
                (_, _, true) => ResetMode::Hard,
                _ => ResetMode::Mixed,
            };

            let mut repository = current_repository()?;
            let _lock = RepoLock::acquire(&repository.kit_path())?;

            repository.reset(target, mode).await?
        }
        Commands::CatFile { sha } => {
            let mut repository = current_repository()?;

            repository.cat_file(sha)?
        }
        Commands::HashObject { write, file } => {
            let mut repository = current_repository()?;

            repository.hash_object(file, *write)?
        }
    }

    Ok(())
}

fn current_repository() -> Result<Repository> {
    let pwd = std::env::current_dir()?;

    if !pwd.join(KIT_DIR).exists() {
        return Err(KitError::NotARepository(pwd.display().to_string()).into());
    }

    Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))
}

fn reset_usage_error(message: &str) -> ! {
    eprintln!("Error: {}", message);
    eprintln!("Usage: kit reset [--soft | --mixed | --hard] <target>");
    std::process::exit(2);
}
