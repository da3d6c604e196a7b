//! 线索提交记录模型。

use serde::{Deserialize, Serialize};

use crate::client_id::ClientId;

/// 一条线索提交。
///
/// 字段名与前端数组元素 `{word, user, username}` 保持一致：`user` 是提交者的客户端 ID，
/// `username` 是提交时的显示名称。同一客户端的唯一性由传输层保证，这里不做校验。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// 提交的线索单词。
    pub word: String,
    /// 提交者的客户端 ID。
    pub user: ClientId,
    /// 提交者的显示名称。
    pub username: String,
}

impl Submission {
    pub fn new(word: impl Into<String>, user: ClientId, username: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            user,
            username: username.into(),
        }
    }

    /// 该提交是否出自给定的客户端。
    pub fn is_from(&self, client_id: &ClientId) -> bool {
        &self.user == client_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_json_shape() {
        let submission = Submission::new("fruit", ClientId::from("abc"), "alice");
        let value = serde_json::to_value(&submission).unwrap();
        assert_eq!(value["word"], "fruit");
        assert_eq!(value["user"], "abc");
        assert_eq!(value["username"], "alice");
    }

    #[test]
    fn test_is_from() {
        let submission = Submission::new("tree", ClientId::from("id-1"), "bob");
        assert!(submission.is_from(&ClientId::from("id-1")));
        assert!(!submission.is_from(&ClientId::from("id-2")));
    }
}
