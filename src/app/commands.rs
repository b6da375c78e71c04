use crate::utils::error::{AppError, Result};
use std::str::FromStr;

/// One line typed into the interactive front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Lookup(String),
    Remove(String),
    Toggle(String),
    Clear,
    List,
    Help,
    Quit,
}

pub const HELP_TEXT: &str = "\
Comandos:
  buscar <chave>   consulta a nota fiscal (44 dígitos) e monta a lista
  marcar <nome>    marca ou desmarca um produto
  remover <nome>   remove um produto da lista
  limpar           apaga a lista desta sessão
  listar           mostra a lista atual
  ajuda            mostra esta ajuda
  sair             encerra";

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_lowercase().as_str() {
            "buscar" | "lookup" => Command::Lookup(rest.to_string()),
            "remover" | "remove" => Command::Remove(require_argument(line, rest)?),
            "marcar" | "toggle" => Command::Toggle(require_argument(line, rest)?),
            "limpar" | "clear" => Command::Clear,
            "listar" | "list" | "" => Command::List,
            "ajuda" | "help" | "?" => Command::Help,
            "sair" | "quit" | "exit" => Command::Quit,
            _ => {
                return Err(AppError::InvalidCommandError {
                    input: line.to_string(),
                    reason: "unknown command".to_string(),
                })
            }
        };
        Ok(command)
    }
}

fn require_argument(line: &str, rest: &str) -> Result<String> {
    if rest.is_empty() {
        return Err(AppError::InvalidCommandError {
            input: line.to_string(),
            reason: "missing product name".to_string(),
        });
    }
    Ok(rest.to_string())
}
