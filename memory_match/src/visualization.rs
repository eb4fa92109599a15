use crate::MatchEngine;

/// Draws the board as the engine knows it.
///
/// `🂠` is a card nobody has looked at, `○` a remembered card, `◉` the first
/// card of the current pair attempt and `✓` a matched card.
pub fn visualize_board(engine: &MatchEngine) -> String {
    let layout = engine.layout();
    let pending = engine.pending().map(|p| p.square);

    let mut result = String::from("    ");
    for col in 1..=u16::from(layout.columns) {
        result += &format!("{:<2}", col);
    }
    // Draw the top of the box
    result += "\n   ╭";
    for _ in 0..layout.columns {
        result += "──";
    }
    result += "╮";

    let mut current_row = None;
    for square in layout.squares() {
        if current_row != Some(square.row) {
            if current_row.is_some() {
                result += "│";
            }
            result += &format!("\n {} │", square.row_letter());
            current_row = Some(square.row);
        }
        let symbol = if engine.matched().contains(&square) {
            '✓'
        } else if pending == Some(square) {
            '◉'
        } else if engine.board().contains_key(&square) {
            '○'
        } else {
            '🂠'
        };
        result += &format!("{} ", symbol);
    }
    // Draw the bottom of the box
    result += "│\n   ╰";
    for _ in 0..layout.columns {
        result += "──";
    }
    result += &format!(
        "╯\n   human {} · robot {} · {} to play",
        engine.scores().human,
        engine.scores().robot,
        engine.turn()
    );
    result
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::{square, CardFeatures, GameConfig};

    #[test]
    fn draws_every_state() {
        let config = GameConfig {
            rows: 2,
            columns: 3,
            ..GameConfig::default()
        };
        let mut engine = MatchEngine::new(&config, StdRng::seed_from_u64(0)).unwrap();
        let card = |x: f32| CardFeatures::new(vec![x, 0.0], vec![]);
        engine.reveal(square!("A1"), card(1.0), None).unwrap();
        engine.reveal(square!("B1"), card(1.0), None).unwrap();
        engine.reveal(square!("A2"), card(5.0), None).unwrap();
        assert_eq!(
            visualize_board(&engine),
            [
                "    1 2 3 ",
                "   ╭──────╮",
                " A │✓ ◉ 🂠 │",
                " B │✓ 🂠 🂠 │",
                "   ╰──────╯",
                "   human 1 · robot 0 · human to play",
            ]
            .join("\n")
        );
    }
}
