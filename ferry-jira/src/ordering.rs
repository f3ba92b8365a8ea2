//! Chronological ordering of comments before they are replayed.

use crate::models::Comment;

/// Sort comments by creation time, oldest first
///
/// The sort is stable, so comments sharing a timestamp keep the order Jira
/// returned them in. Timestamps are compared as instants, so differing UTC
/// offsets are handled correctly.
pub fn order_comments(mut comments: Vec<Comment>) -> Vec<Comment> {
  comments.sort_by_key(|comment| comment.created);
  comments
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::jira_timestamp;

  fn comment(id: &str, created: &str) -> Comment {
    Comment {
      id: id.to_string(),
      body: format!("comment {id}"),
      author: serde_json::Value::Null,
      created: jira_timestamp::parse(created).unwrap(),
    }
  }

  fn ids(comments: &[Comment]) -> Vec<&str> {
    comments.iter().map(|c| c.id.as_str()).collect()
  }

  #[test]
  fn test_orders_by_creation_time() {
    let ordered = order_comments(vec![
      comment("c", "2024-01-03T10:00:00.000+0000"),
      comment("a", "2024-01-01T10:00:00.000+0000"),
      comment("b", "2024-01-02T10:00:00.000+0000"),
    ]);

    assert_eq!(ids(&ordered), vec!["a", "b", "c"]);
    assert!(ordered.windows(2).all(|pair| pair[0].created <= pair[1].created));
  }

  #[test]
  fn test_millisecond_precision_matters() {
    let ordered = order_comments(vec![
      comment("second", "2024-01-01T10:00:00.002+0000"),
      comment("first", "2024-01-01T10:00:00.001+0000"),
    ]);

    assert_eq!(ids(&ordered), vec!["first", "second"]);
  }

  #[test]
  fn test_ties_keep_input_order() {
    let ordered = order_comments(vec![
      comment("x", "2024-01-01T10:00:00.000+0000"),
      comment("early", "2023-12-31T10:00:00.000+0000"),
      comment("y", "2024-01-01T10:00:00.000+0000"),
      comment("z", "2024-01-01T11:00:00.000+0100"),
    ]);

    // 11:00+0100 is the same instant as 10:00+0000
    assert_eq!(ids(&ordered), vec!["early", "x", "y", "z"]);
  }

  #[test]
  fn test_offsets_compare_as_instants() {
    let ordered = order_comments(vec![
      comment("utc", "2024-01-01T10:00:00.000+0000"),
      comment("warsaw", "2024-01-01T10:30:00.000+0100"),
    ]);

    assert_eq!(ids(&ordered), vec!["warsaw", "utc"]);
  }

  #[test]
  fn test_empty_input() {
    assert!(order_comments(Vec::new()).is_empty());
  }
}
