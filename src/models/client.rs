#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Column values to overwrite on an existing client. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl ClientChanges {
    pub fn first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = Some(value.into());
        self
    }

    pub fn last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = Some(value.into());
        self
    }

    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.email = Some(value.into());
        self
    }

    /// Pairs of `(column, new value)` for every field that is set, in column order.
    pub fn columns(&self) -> Vec<(&'static str, &str)> {
        [
            ("first_name", self.first_name.as_deref()),
            ("last_name", self.last_name.as_deref()),
            ("email", self.email.as_deref()),
        ]
        .into_iter()
        .filter_map(|(column, value)| value.map(|v| (column, v)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.columns().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_changes_touch_no_columns() {
        let changes = ClientChanges::default();
        assert!(changes.is_empty());
        assert!(changes.columns().is_empty());
    }

    #[test]
    fn only_set_fields_become_columns() {
        let changes = ClientChanges::default()
            .email("new@mail.ru")
            .first_name("Ivan");
        assert_eq!(
            changes.columns(),
            vec![("first_name", "Ivan"), ("email", "new@mail.ru")]
        );
    }
}
