use crate::coord::Coord;
use crate::error::SnapshotError;
use crate::grid::{Grid, MAX_DIMENSION};
use crate::turn::{Agent, GameInfo, Turn};
use crate::wire::{WireAgent, WireNotification, WireSnapshot};

/// Decodes a move request body in place using simd-json.
pub fn decode(bytes: &mut [u8]) -> Result<Turn, SnapshotError> {
    let snapshot: WireSnapshot = simd_json::serde::from_slice(bytes)?;
    parse(snapshot)
}

/// Decodes a move request from a JSON string.
pub fn parse_str(json: &str) -> Result<Turn, SnapshotError> {
    let snapshot: WireSnapshot = serde_json::from_str(json)?;
    parse(snapshot)
}

/// Decodes the game header of a start or end notification.
pub fn decode_game_info(bytes: &mut [u8]) -> Result<GameInfo, SnapshotError> {
    let notification: WireNotification = simd_json::serde::from_slice(bytes)?;
    Ok(GameInfo {
        game_id: notification.game.id,
        timeout_ms: notification.game.timeout,
    })
}

/// Validates a decoded snapshot and builds the turn's grid.
///
/// The acting agent is the board agent whose id matches `you`. Without a `you` entry the
/// first agent in the board's list acts.
pub fn parse(snapshot: WireSnapshot) -> Result<Turn, SnapshotError> {
    let WireSnapshot {
        game,
        turn,
        board,
        you,
    } = snapshot;

    let (width, height) = (board.width, board.height);
    if Grid::cell_count(width, height).is_none() {
        return Err(SnapshotError::malformed(format!(
            "board dimensions must be within 1..={MAX_DIMENSION}, got {width}x{height}"
        )));
    }

    for &f in &board.food {
        on_board(f, width, height, "food")?;
    }

    let agents = board
        .snakes
        .into_iter()
        .map(|a| agent(a, width, height))
        .collect::<Result<Vec<_>, _>>()?;

    let you_index = match you {
        Some(you) => agents
            .iter()
            .position(|a| a.id == you.id)
            .ok_or_else(|| {
                SnapshotError::malformed(format!("agent `{}` is not on the board", you.id))
            })?,
        None if agents.is_empty() => {
            return Err(SnapshotError::malformed("board has no agents"));
        }
        None => 0,
    };

    let grid = Grid::classify(width, height, &board.food, &agents, you_index);
    Ok(Turn::new(
        game.id,
        game.timeout,
        turn,
        board.food,
        agents,
        you_index,
        grid,
    ))
}

fn agent(wire: WireAgent, width: i32, height: i32) -> Result<Agent, SnapshotError> {
    let health = u8::try_from(wire.health)
        .ok()
        .filter(|h| *h <= 100)
        .ok_or_else(|| {
            SnapshotError::malformed(format!(
                "agent `{}` has health {} outside 0..=100",
                wire.id, wire.health
            ))
        })?;

    on_board(wire.head, width, height, "head")?;
    let body: Vec<Coord> = wire.body.into_iter().map_while(|segment| segment).collect();
    for &segment in &body {
        on_board(segment, width, height, "body segment")?;
    }
    if let Some(&first) = body.first() {
        if first != wire.head {
            return Err(SnapshotError::malformed(format!(
                "agent `{}` head {} does not match first body segment {}",
                wire.id, wire.head, first
            )));
        }
    }

    Ok(Agent {
        id: wire.id,
        name: wire.name,
        health,
        body,
        head: wire.head,
        reported_length: wire.length,
        latency: wire.latency,
        shout: wire.shout,
        squad: wire.squad.filter(|s| !s.is_empty()),
    })
}

fn on_board(c: Coord, width: i32, height: i32, what: &str) -> Result<(), SnapshotError> {
    if (0..width).contains(&c.x) && (0..height).contains(&c.y) {
        Ok(())
    } else {
        Err(SnapshotError::malformed(format!(
            "{what} {c} lies outside the {width}x{height} board"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;
    use serde_json::json;

    fn snapshot(board: serde_json::Value) -> serde_json::Value {
        json!({
            "game": {"id": "game-1", "timeout": 500},
            "turn": 7,
            "board": board,
        })
    }

    fn snake(
        id: &str,
        body: serde_json::Value,
        head: serde_json::Value,
        length: u32,
    ) -> serde_json::Value {
        json!({
            "id": id,
            "name": id,
            "health": 90,
            "body": body,
            "head": head,
            "length": length,
            "latency": "12",
            "shout": "",
        })
    }

    #[test]
    fn test_three_segment_body() {
        let raw = snapshot(json!({
            "width": 5,
            "height": 5,
            "food": [{"x": 0, "y": 0}],
            "snakes": [snake(
                "me",
                json!([{"x": 2, "y": 2}, {"x": 2, "y": 1}, {"x": 2, "y": 0}]),
                json!({"x": 2, "y": 2}),
                3,
            )],
        }));
        let turn = parse_str(&raw.to_string()).unwrap();

        assert_eq!(turn.game_id, "game-1");
        assert_eq!(turn.timeout_ms, 500);
        assert_eq!(turn.turn, 7);
        assert_eq!(turn.you().head, Coord::new(2, 2));
        assert_eq!(turn.you().length(), 3);
        assert_eq!(turn.board.cell(Coord::new(2, 2)), Some(Cell::SelfHead));
        assert_eq!(turn.board.cell(Coord::new(0, 0)), Some(Cell::Food));
    }

    #[test]
    fn test_missing_height_is_malformed() {
        let raw = snapshot(json!({"width": 5, "snakes": []}));
        let err = parse_str(&raw.to_string()).unwrap_err();
        assert!(matches!(err, SnapshotError::Malformed(ref m) if m.contains("height")));
    }

    #[test]
    fn test_mistyped_turn_is_malformed() {
        let mut raw = snapshot(json!({"width": 5, "height": 5, "snakes": []}));
        raw["turn"] = json!("seven");
        assert!(matches!(
            parse_str(&raw.to_string()),
            Err(SnapshotError::Malformed(_))
        ));
    }

    #[test]
    fn test_missing_agent_health_is_malformed() {
        let mut agent = snake("me", json!([{"x": 1, "y": 1}]), json!({"x": 1, "y": 1}), 1);
        agent.as_object_mut().unwrap().remove("health");
        let raw = snapshot(json!({"width": 3, "height": 3, "snakes": [agent]}));
        assert!(parse_str(&raw.to_string()).is_err());
    }

    #[test]
    fn test_null_segment_ends_body() {
        let raw = snapshot(json!({
            "width": 5,
            "height": 5,
            "snakes": [snake(
                "me",
                json!([{"x": 1, "y": 1}, {"x": 1, "y": 0}, null, {"x": 0, "y": 0}]),
                json!({"x": 1, "y": 1}),
                4,
            )],
        }));
        let turn = parse_str(&raw.to_string()).unwrap();
        assert_eq!(turn.you().body, vec![Coord::new(1, 1), Coord::new(1, 0)]);
        assert_eq!(turn.you().length(), 2);
        assert_eq!(turn.you().reported_length, 4);
        assert_eq!(turn.board.cell(Coord::new(0, 0)), Some(Cell::Empty));
    }

    #[test]
    fn test_empty_body_is_valid() {
        let raw = snapshot(json!({
            "width": 5,
            "height": 5,
            "snakes": [snake("gone", json!([]), json!({"x": 3, "y": 3}), 0)],
        }));
        let turn = parse_str(&raw.to_string()).unwrap();
        assert!(turn.you().is_eliminated());
        assert_eq!(turn.you().length(), 0);
        assert_eq!(turn.you().head, Coord::new(3, 3));
    }

    #[test]
    fn test_first_agent_acts_without_you() {
        let raw = snapshot(json!({
            "width": 5,
            "height": 5,
            "snakes": [
                snake("first", json!([{"x": 0, "y": 0}]), json!({"x": 0, "y": 0}), 1),
                snake("second", json!([{"x": 4, "y": 4}]), json!({"x": 4, "y": 4}), 1),
            ],
        }));
        let turn = parse_str(&raw.to_string()).unwrap();
        assert_eq!(turn.you().id, "first");
        assert_eq!(turn.board.cell(Coord::new(4, 4)), Some(Cell::EnemyBody));
        assert_eq!(turn.enemies().count(), 1);
    }

    #[test]
    fn test_you_selects_acting_agent() {
        let second = snake("second", json!([{"x": 4, "y": 4}]), json!({"x": 4, "y": 4}), 1);
        let mut raw = snapshot(json!({
            "width": 5,
            "height": 5,
            "snakes": [
                snake("first", json!([{"x": 0, "y": 0}]), json!({"x": 0, "y": 0}), 1),
                second.clone(),
            ],
        }));
        raw["you"] = second;
        let turn = parse_str(&raw.to_string()).unwrap();
        assert_eq!(turn.you().id, "second");
        assert_eq!(turn.board.cell(Coord::new(4, 4)), Some(Cell::SelfHead));
        assert_eq!(turn.board.cell(Coord::new(0, 0)), Some(Cell::EnemyBody));
    }

    #[test]
    fn test_unknown_you_is_malformed() {
        let mut raw = snapshot(json!({
            "width": 5,
            "height": 5,
            "snakes": [snake("first", json!([{"x": 0, "y": 0}]), json!({"x": 0, "y": 0}), 1)],
        }));
        raw["you"] = snake("ghost", json!([{"x": 2, "y": 2}]), json!({"x": 2, "y": 2}), 1);
        assert!(parse_str(&raw.to_string()).is_err());
    }

    #[test]
    fn test_no_agents_is_malformed() {
        let raw = snapshot(json!({"width": 5, "height": 5, "snakes": []}));
        assert!(parse_str(&raw.to_string()).is_err());
    }

    #[test]
    fn test_rejects_inconsistent_agents() {
        let head_mismatch = snake("me", json!([{"x": 1, "y": 1}]), json!({"x": 2, "y": 2}), 1);
        let off_board = snake("me", json!([{"x": 5, "y": 1}]), json!({"x": 5, "y": 1}), 1);
        let mut overfed = snake("me", json!([{"x": 1, "y": 1}]), json!({"x": 1, "y": 1}), 1);
        overfed["health"] = json!(101);

        for agent in [head_mismatch, off_board, overfed] {
            let raw = snapshot(json!({"width": 5, "height": 5, "snakes": [agent]}));
            assert!(parse_str(&raw.to_string()).is_err());
        }
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        let raw = snapshot(json!({"width": 0, "height": 5, "snakes": []}));
        let err = parse_str(&raw.to_string()).unwrap_err();
        assert!(err.to_string().contains("0x5"));
    }

    #[test]
    fn test_rejects_oversized_boards() {
        let agent = snake("me", json!([{"x": 0, "y": 0}]), json!({"x": 0, "y": 0}), 1);
        for (width, height) in [(65536, 65536), (46000, 46000), (256, 11), (11, i32::MAX)] {
            let raw = snapshot(json!({"width": width, "height": height, "snakes": [agent.clone()]}));
            let err = parse_str(&raw.to_string()).unwrap_err();
            assert!(
                matches!(err, SnapshotError::Malformed(ref m) if m.contains("dimensions")),
                "{width}x{height}: {err}"
            );
        }

        let raw = snapshot(json!({"width": 255, "height": 255, "snakes": [agent]}));
        let turn = parse_str(&raw.to_string()).unwrap();
        assert_eq!(turn.board.width(), 255);
    }

    #[test]
    fn test_simd_decode_matches_serde_json() {
        let raw = include_str!("../fixtures/mid_game.json");
        let mut bytes = raw.as_bytes().to_vec();
        assert_eq!(decode(&mut bytes).unwrap(), parse_str(raw).unwrap());
    }

    #[test]
    fn test_decode_game_info() {
        let mut bytes = br#"{"game":{"id":"abc","timeout":250},"turn":0}"#.to_vec();
        let info = decode_game_info(&mut bytes).unwrap();
        assert_eq!(info.game_id, "abc");
        assert_eq!(info.timeout_ms, 250);

        let mut empty = b"{}".to_vec();
        assert!(decode_game_info(&mut empty).is_err());
    }
}
