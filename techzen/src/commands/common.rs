//! Shared helpers for the `run`/`repl` commands.

use techzen_eval::{Value, ValueKind};

/// Formats a program's top-level result for display: a single-element
/// list prints just its element (matching the REPL contract), anything
/// else prints as-is.
pub fn render_top_level(value: &Value) -> String {
    match &value.kind {
        ValueKind::List(elements) if elements.borrow().len() == 1 => elements.borrow()[0].to_string(),
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_element_list_prints_the_element() {
        let value = Value::list(vec![Value::int(5)]);
        assert_eq!(render_top_level(&value), "5");
    }

    #[test]
    fn multi_element_list_prints_as_a_list() {
        let value = Value::list(vec![Value::int(1), Value::int(2)]);
        assert_eq!(render_top_level(&value), "1, 2");
    }

    #[test]
    fn non_list_prints_directly() {
        assert_eq!(render_top_level(&Value::int(9)), "9");
    }
}
