use crate::domain::model::ListState;

pub fn render_state(state: &ListState) -> String {
    match state {
        ListState::AwaitingLookup => {
            "Compra fácil\nCole a chave da nota fiscal com: buscar <chave>".to_string()
        }
        ListState::Loaded(list) if list.is_empty() => {
            "Produtos encontrados: nenhum (use 'limpar' para consultar outra nota)".to_string()
        }
        ListState::Loaded(list) => {
            let mut lines = vec!["Produtos encontrados:".to_string()];
            lines.extend(list.entries().map(|entry| {
                format!("  [{}] {}", if entry.checked { "x" } else { " " }, entry.name)
            }));
            lines.join("\n")
        }
    }
}
