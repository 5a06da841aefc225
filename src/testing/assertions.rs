//! Assertion checking for test expectations

use std::collections::BTreeMap;

use super::parser::{ExpectedEvent, StateAssertion};
use crate::events::{BusEvent, serialize_event};
use crate::world::GameWorld;

/// Error when an assertion fails
#[derive(Debug)]
pub struct AssertionError {
    pub message: String,
    pub expected: String,
    pub actual: String,
}

impl std::fmt::Display for AssertionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n    Expected: {}\n    Actual: {}", self.message, self.expected, self.actual)
    }
}

/// Captured event, split out of its compact log line
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedEvent {
    pub frame: u64,
    pub code: String,
    pub data: Option<String>,
}

impl CapturedEvent {
    pub fn from_bus(event: &BusEvent) -> Self {
        let line = serialize_event(event.frame, &event.event);
        // "F:NNNNNN|CODE" or "F:NNNNNN|CODE|data"
        let mut parts = line.splitn(3, '|').skip(1);
        Self {
            frame: event.frame,
            code: parts.next().unwrap_or_default().to_string(),
            data: parts.next().map(str::to_string),
        }
    }
}

/// Check if captured events match expected sequence (in order, gaps allowed)
pub fn check_sequence(expected: &[ExpectedEvent], captured: &[CapturedEvent]) -> Result<(), AssertionError> {
    let mut captured_idx = 0;

    for (i, exp) in expected.iter().enumerate() {
        let found = captured[captured_idx..].iter().enumerate().find(|(_, cap)| {
            cap.code == exp.event
                && exp.data.as_ref().is_none_or(|d| cap.data.as_ref() == Some(d))
                && exp.frame_min.is_none_or(|min| cap.frame >= min)
                && exp.frame_max.is_none_or(|max| cap.frame <= max)
        });

        match found {
            Some((offset, _)) => captured_idx += offset + 1,
            None => {
                let data_str = exp.data.as_ref().map(|d| format!(" ({})", d)).unwrap_or_default();
                let window = match (exp.frame_min, exp.frame_max) {
                    (None, None) => String::new(),
                    (min, max) => format!(
                        " in frames {}..={}",
                        min.unwrap_or(0),
                        max.map_or("end".to_string(), |m| m.to_string())
                    ),
                };
                return Err(AssertionError {
                    message: format!("Event #{} '{}'{} not found", i + 1, exp.event, data_str),
                    expected: format!("'{}' event{}", exp.event, window),
                    actual: format!(
                        "events after position {}: {:?}",
                        captured_idx,
                        captured[captured_idx..]
                            .iter()
                            .map(|e| format!("{}@{}", e.code, e.frame))
                            .collect::<Vec<_>>()
                    ),
                });
            }
        }
    }

    Ok(())
}

/// Fail if any of the listed codes was captured
pub fn check_absent(codes: &[String], captured: &[CapturedEvent]) -> Result<(), AssertionError> {
    for code in codes {
        if let Some(cap) = captured.iter().find(|c| c.code == *code) {
            return Err(AssertionError {
                message: format!("Event '{}' should not occur", code),
                expected: "no occurrence".to_string(),
                actual: format!("frame {}", cap.frame),
            });
        }
    }
    Ok(())
}

/// One observable value
#[derive(Debug, Clone, PartialEq)]
pub enum StateValue {
    Number(f32),
    Flag(bool),
    Text(String),
}

impl std::fmt::Display for StateValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateValue::Number(n) => write!(f, "{:.1}", n),
            StateValue::Flag(b) => write!(f, "{}", b),
            StateValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Flattened world state for assertions, keyed by path (`player.x`, `score`)
pub struct WorldState {
    pub values: BTreeMap<String, StateValue>,
}

impl WorldState {
    pub fn capture(world: &GameWorld) -> Self {
        use StateValue::*;

        let mut values = BTreeMap::new();
        let mut put = |key: &str, value: StateValue| {
            values.insert(key.to_string(), value);
        };

        put("frame", Number(world.frame() as f32));
        put("state", Text(format!("{:?}", world.state())));
        put("level", Number(world.level_number() as f32));
        put("score", Number(world.score.total as f32));
        put("score.enemies", Number(world.score.enemies_defeated as f32));
        put("score.items", Number(world.score.items_collected as f32));
        put("score.levels", Number(world.score.levels_completed as f32));
        put("enemies", Number(world.enemies.len() as f32));
        put("bullets", Number(world.bullets.len() as f32));
        put(
            "items_left",
            Number(world.collectibles.iter().filter(|c| !c.is_collected()).count() as f32),
        );
        put("log", Number(world.action_log().len() as f32));
        put("shadow.active", Flag(world.shadow.is_some()));

        let avatars = [
            ("player", Some(&world.player)),
            ("shadow", world.shadow.as_ref().map(|s| &s.body)),
        ];
        for (name, body) in avatars {
            let Some(body) = body else { continue };
            put(&format!("{}.x", name), Number(body.pos.x));
            put(&format!("{}.y", name), Number(body.pos.y));
            put(&format!("{}.vx", name), Number(body.vel.x));
            put(&format!("{}.vy", name), Number(body.vel.y));
            put(&format!("{}.health", name), Number(body.health as f32));
            put(&format!("{}.facing", name), Number(body.facing));
            put(&format!("{}.grounded", name), Flag(body.grounded));
        }

        if let Some(enemy) = world.enemies.first() {
            put("enemy.x", Number(enemy.pos.x));
            put("enemy.y", Number(enemy.pos.y));
            put("enemy.health", Number(enemy.health as f32));
        }

        Self { values }
    }
}

/// Parse a check string into (path, operator, value)
fn parse_check(check: &str) -> Option<(&str, &str, &str)> {
    // Try operators in order of specificity (>= before >, etc.)
    for op in &[">=", "<=", "!=", "==", "=", ">", "<"] {
        if let Some(idx) = check.find(op) {
            let path = check[..idx].trim();
            let value = check[idx + op.len()..].trim();
            return Some((path, op, value));
        }
    }
    None
}

/// Check state assertions against world state
pub fn check_state(assertion: &StateAssertion, state: &WorldState) -> Result<(), AssertionError> {
    for check in &assertion.checks {
        let (path, operator, expected_value) = parse_check(check).ok_or_else(|| AssertionError {
            message: format!("Invalid check syntax: {}", check),
            expected: "format: 'path = value' or 'path > value'".to_string(),
            actual: check.clone(),
        })?;

        let actual = state.values.get(path).ok_or_else(|| AssertionError {
            message: format!("Unknown or absent value '{}' at frame {}", path, assertion.after_frame),
            expected: format!("one of {:?}", state.values.keys().collect::<Vec<_>>()),
            actual: path.to_string(),
        })?;

        let pass = match actual {
            StateValue::Number(n) => compare_float(*n, operator, expected_value, path)?,
            StateValue::Flag(b) => compare_eq(&b.to_string(), operator, expected_value),
            StateValue::Text(s) => compare_eq(s, operator, expected_value.trim_matches('"')),
        };

        if !pass {
            return Err(AssertionError {
                message: format!("Check failed at frame {}: {}", assertion.after_frame, check),
                expected: format!("{} {} {}", path, operator, expected_value),
                actual: actual.to_string(),
            });
        }
    }

    Ok(())
}

fn compare_eq(actual: &str, operator: &str, expected: &str) -> bool {
    match operator {
        "!=" => actual != expected,
        _ => actual == expected,
    }
}

fn compare_float(actual: f32, operator: &str, expected_str: &str, path: &str) -> Result<bool, AssertionError> {
    let value: f32 = expected_str.parse().map_err(|_| AssertionError {
        message: format!("Invalid value for {}", path),
        expected: "number".to_string(),
        actual: expected_str.to_string(),
    })?;

    Ok(match operator {
        ">=" => actual >= value,
        "<=" => actual <= value,
        ">" => actual > value,
        "<" => actual < value,
        "!=" => (actual - value).abs() >= 0.1,
        _ => (actual - value).abs() < 0.1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Avatar, GameEvent};

    fn captured(frame: u64, code: &str, data: Option<&str>) -> CapturedEvent {
        CapturedEvent {
            frame,
            code: code.to_string(),
            data: data.map(str::to_string),
        }
    }

    fn expected(event: &str, data: Option<&str>) -> ExpectedEvent {
        ExpectedEvent {
            event: event.to_string(),
            data: data.map(str::to_string),
            frame_min: None,
            frame_max: None,
        }
    }

    #[test]
    fn test_capture_splits_log_line() {
        let cap = CapturedEvent::from_bus(&BusEvent {
            frame: 12,
            event: GameEvent::Jump {
                avatar: Avatar::Shadow,
            },
        });
        assert_eq!(cap, captured(12, "J", Some("S")));

        let cap = CapturedEvent::from_bus(&BusEvent {
            frame: 3,
            event: GameEvent::ShadowCreated,
        });
        assert_eq!(cap, captured(3, "S+", None));
    }

    #[test]
    fn test_sequence_in_order_with_gaps() {
        let events = vec![
            captured(1, "S+", None),
            captured(5, "J", Some("P")),
            captured(95, "J", Some("S")),
        ];
        assert!(check_sequence(&[expected("S+", None), expected("J", Some("S"))], &events).is_ok());
        assert!(check_sequence(&[expected("J", Some("S")), expected("J", Some("P"))], &events).is_err());
    }

    #[test]
    fn test_sequence_frame_window() {
        let events = vec![captured(5, "J", Some("P")), captured(95, "J", Some("P"))];
        let exp = ExpectedEvent {
            frame_min: Some(90),
            frame_max: Some(100),
            ..expected("J", None)
        };
        assert!(check_sequence(&[exp], &events).is_ok());
    }

    #[test]
    fn test_absent() {
        let events = vec![captured(5, "J", Some("P"))];
        assert!(check_absent(&["SH".to_string()], &events).is_ok());
        assert!(check_absent(&["J".to_string()], &events).is_err());
    }

    #[test]
    fn test_parse_check_operators() {
        assert_eq!(parse_check("score >= 100"), Some(("score", ">=", "100")));
        assert_eq!(parse_check("state == Paused"), Some(("state", "==", "Paused")));
        assert_eq!(parse_check("player.x < 3"), Some(("player.x", "<", "3")));
    }

    #[test]
    fn test_check_state_types() {
        let mut values = BTreeMap::new();
        values.insert("score".to_string(), StateValue::Number(150.0));
        values.insert("state".to_string(), StateValue::Text("Playing".to_string()));
        values.insert("shadow.active".to_string(), StateValue::Flag(true));
        let state = WorldState { values };

        let ok = StateAssertion {
            after_frame: 10,
            checks: vec![
                "score >= 100".to_string(),
                "state = Playing".to_string(),
                "shadow.active = true".to_string(),
            ],
        };
        assert!(check_state(&ok, &state).is_ok());

        let bad = StateAssertion {
            after_frame: 10,
            checks: vec!["score < 100".to_string()],
        };
        assert!(check_state(&bad, &state).is_err());

        let unknown = StateAssertion {
            after_frame: 10,
            checks: vec!["shadow.x = 1".to_string()],
        };
        assert!(check_state(&unknown, &state).is_err());
    }
}
