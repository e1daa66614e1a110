use bzalpha_contracts::Department;
use bzalpha_contracts::Rank;

/// Round badge in the first column of the order table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankAvatar {
    pub code: String,
    pub department: Department,
}

impl RankAvatar {
    pub fn for_position(position: &str) -> Self {
        Self {
            code: position.trim().to_uppercase(),
            department: Rank::department_of(position),
        }
    }

    pub fn badge(&self) -> &str {
        if self.code.is_empty() { "?" } else { &self.code }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_for_known_and_unknown_positions() {
        let chief_engineer = RankAvatar::for_position("c/e");
        assert_eq!(chief_engineer.badge(), "C/E");
        assert_eq!(chief_engineer.department, Department::Engine);

        let empty = RankAvatar::for_position("");
        assert_eq!(empty.badge(), "?");
        assert_eq!(empty.department, Department::Other);
    }
}
