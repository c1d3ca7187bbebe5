// Interactive drill-down commands read from stdin.
//
// Both the Portuguese words used by the dashboard's audience and English aliases are
// accepted. A bare number picks one of the department cards on screen, like a click.
use super::view_controller::ViewController;
use shared::models::ViewSnapshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Filter by department name (rest of the line, inner spaces preserved).
    Filter(String),
    /// Filter by the n-th department card of the current snapshot, 1-based.
    SelectCard(usize),
    Reset,
    Show,
    Help,
    Quit,
    Unknown(String),
}

pub const HELP: &str = "\
Comandos:
  filtrar <departamento>   mostra apenas um departamento (alias: filter)
  <n>                      seleciona o n-ésimo card de departamento
  limpar                   volta para a visão geral (alias: reset)
  mostrar                  redesenha o painel (alias: show)
  ajuda                    esta mensagem (alias: help)
  sair                     encerra (alias: quit, exit)";

impl Command {
    /// None for blank lines.
    pub fn parse(line: &str) -> Option<Command> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "filtrar" | "filter" if !rest.is_empty() => Command::Filter(rest.to_string()),
            "limpar" | "reset" => Command::Reset,
            "mostrar" | "show" => Command::Show,
            "ajuda" | "help" | "?" => Command::Help,
            "sair" | "quit" | "exit" => Command::Quit,
            _ => match line.parse::<usize>() {
                Ok(n) if n > 0 => Command::SelectCard(n),
                _ => Command::Unknown(word.to_string()),
            },
        };
        Some(command)
    }
}

/// What the host loop should do after a command has been applied.
#[derive(Debug, PartialEq)]
pub enum Outcome<'a> {
    Render(&'a ViewSnapshot),
    ShowHelp,
    Quit,
}

/// Applies one command to the controller.
pub fn apply(controller: &mut ViewController, command: Command) -> Outcome<'_> {
    match command {
        Command::Filter(name) => Outcome::Render(controller.filter_by_department(&name)),
        Command::SelectCard(n) => {
            let name = n
                .checked_sub(1)
                .and_then(|idx| controller.snapshot().top_departments.get(idx))
                .map(|dept| dept.name.clone());
            match name {
                Some(name) => Outcome::Render(controller.filter_by_department(&name)),
                None => {
                    tracing::warn!(card = n, "No department card with this number");
                    Outcome::ShowHelp
                }
            }
        }
        Command::Reset => Outcome::Render(controller.reset()),
        Command::Show => Outcome::Render(controller.snapshot()),
        Command::Help => Outcome::ShowHelp,
        Command::Quit => Outcome::Quit,
        Command::Unknown(word) => {
            tracing::warn!(%word, "Unknown command");
            Outcome::ShowHelp
        }
    }
}
