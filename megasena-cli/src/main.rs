mod analysis;
mod app;
mod config;
mod display;
mod import;
mod interactive;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use megasena_db::db::{SqliteStore, db_path};

use crate::app::App;
use crate::config::Settings;
use crate::display::TerminalUi;

#[derive(Parser)]
#[command(name = "megasena", about = "Histórico, frequências e geração de conjuntos da Mega-Sena")]
struct Cli {
    /// Caminho da base de dados (padrão: ./data/megasena.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Arquivo JSON de configuração
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Adicionar um conjunto de 6 números
    Add {
        /// Números (ex: 01,05,12,23,45,50 ou 1 5 12 23 45 50)
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        numbers: Vec<String>,
    },

    /// Importar o histórico de um arquivo JSON (substitui o atual)
    Import {
        /// Caminho do arquivo JSON
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Exportar o histórico para um arquivo JSON
    Export {
        /// Arquivo de saída (padrão: historico_numeros.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Listar o histórico, do mais recente ao mais antigo
    List,

    /// Mostrar os números mais frequentes
    Stats,

    /// Gerar conjuntos a partir dos números mais frequentes
    Generate {
        /// Seed para reprodutibilidade
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Modo interativo
    Interactive {
        /// Seed para reprodutibilidade
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Mostrar o caminho da base de dados
    DbPath,
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();

    let path = cli.db.unwrap_or_else(db_path);
    if let Command::DbPath = cli.command {
        println!("{}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let settings = Settings::load(cli.config.as_deref())?;
    let seed = match cli.command {
        Command::Generate { seed } | Command::Interactive { seed } => seed,
        _ => None,
    };
    let store = SqliteStore::open(&path)?;
    let mut app = App::new(store, TerminalUi, settings, seed);

    let ok = match cli.command {
        Command::Add { numbers } => app.add_set(&numbers.join(" ")),
        Command::Import { file } => app.import_file(&file),
        Command::Export { output } => {
            let output = output.unwrap_or_else(|| PathBuf::from(&app.settings().export_file));
            app.export_file(&output)
        }
        Command::List => {
            app.show_history();
            true
        }
        Command::Stats => {
            app.show_frequencies();
            true
        }
        Command::Generate { .. } => app.generate().is_some_and(|batch| !batch.is_exhausted()),
        Command::Interactive { .. } => {
            interactive::run_interactive(&mut app)?;
            true
        }
        Command::DbPath => true,
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
