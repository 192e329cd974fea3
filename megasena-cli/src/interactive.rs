use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use megasena_db::db::KvStore;

use crate::app::{App, Ui};

#[derive(Debug, PartialEq)]
enum InteractiveCommand {
    Add,
    Import,
    Export,
    Generate,
    History,
    Frequencies,
    Quit,
}

fn parse_command(input: &str) -> Option<InteractiveCommand> {
    match input.trim().to_lowercase().as_str() {
        "1" | "adicionar" | "add" => Some(InteractiveCommand::Add),
        "2" | "importar" | "import" | "imp" => Some(InteractiveCommand::Import),
        "3" | "exportar" | "export" | "exp" => Some(InteractiveCommand::Export),
        "4" | "gerar" | "generate" | "gen" => Some(InteractiveCommand::Generate),
        "5" | "historico" | "histórico" | "history" | "hist" => Some(InteractiveCommand::History),
        "6" | "frequencias" | "frequências" | "stats" | "freq" => Some(InteractiveCommand::Frequencies),
        "7" | "sair" | "quit" | "q" | "exit" => Some(InteractiveCommand::Quit),
        _ => None,
    }
}

fn display_menu() {
    println!();
    println!("── Modo interativo ──");
    println!("  1. adicionar    Adicionar um conjunto");
    println!("  2. importar     Importar histórico (JSON)");
    println!("  3. exportar     Exportar histórico (JSON)");
    println!("  4. gerar        Gerar conjuntos");
    println!("  5. historico    Mostrar histórico");
    println!("  6. frequencias  Números mais prováveis");
    println!("  7. sair         Sair");
    println!();
}

fn prompt(msg: &str) -> Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut input = String::new();
    let read = io::stdin()
        .read_line(&mut input)
        .context("Erro de leitura")?;
    if read == 0 {
        anyhow::bail!("Fim da entrada");
    }
    Ok(input.trim().to_string())
}

fn prompt_with_default(msg: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", msg, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

pub fn run_interactive<S: KvStore, U: Ui>(app: &mut App<S, U>) -> Result<()> {
    println!(
        "Bem-vindo ao modo interativo do megasena! ({} conjuntos no histórico)",
        app.history().len()
    );
    app.show_history();
    app.show_frequencies();

    loop {
        display_menu();
        let input = match prompt("> ") {
            Ok(s) => s,
            Err(_) => break, // EOF / Ctrl+D
        };

        if input.is_empty() {
            continue;
        }

        match parse_command(&input) {
            Some(InteractiveCommand::Quit) => {
                println!("Até logo!");
                break;
            }
            Some(InteractiveCommand::Add) => {
                let line = prompt("6 números (1-60, separados por vírgula): ")?;
                app.add_set(&line);
            }
            Some(InteractiveCommand::Import) => {
                let path = prompt("Arquivo JSON: ")?;
                app.import_file(&PathBuf::from(path));
            }
            Some(InteractiveCommand::Export) => {
                let default = app.settings().export_file.clone();
                let path = prompt_with_default("Arquivo de saída", &default)?;
                app.export_file(&PathBuf::from(path));
            }
            Some(InteractiveCommand::Generate) => {
                app.generate();
            }
            Some(InteractiveCommand::History) => app.show_history(),
            Some(InteractiveCommand::Frequencies) => app.show_frequencies(),
            None => {
                println!("Comando desconhecido: '{}'. Digite um número (1-7) ou o nome de um comando.", input);
            }
        }
    }

    Ok(())
}
