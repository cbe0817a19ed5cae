use rusqlite::types::Value as SqlValue;

/// SQL text plus its positional parameters, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl Statement {
    pub fn new(sql: &str) -> Self {
        Self {
            sql: sql.to_string(),
            params: Vec::new(),
        }
    }

    /// Append ` WHERE a AND b ...`, or nothing when the clause is empty.
    pub fn filtered_by(mut self, clause: WhereClause) -> Self {
        if clause.is_empty() {
            return self;
        }
        self.sql.push_str(" WHERE ");
        self.sql.push_str(&clause.predicates.join(" AND "));
        self.params.extend(clause.params);
        self
    }

    pub fn then<I>(mut self, fragment: &str, params: I) -> Self
    where
        I: IntoIterator<Item = SqlValue>,
    {
        self.sql.push(' ');
        self.sql.push_str(fragment);
        self.params.extend(params);
        debug_assert_eq!(count_placeholders(&self.sql), self.params.len());
        self
    }
}

/// Predicate fragments and the values bound to their `?` placeholders.
///
/// A fragment and its values are always pushed together, so the parameter
/// list stays aligned with the placeholders of the joined clause.
#[derive(Debug, Default)]
pub struct WhereClause {
    predicates: Vec<String>,
    params: Vec<SqlValue>,
}

impl WhereClause {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and<I>(&mut self, predicate: &str, params: I) -> &mut Self
    where
        I: IntoIterator<Item = SqlValue>,
    {
        let before = self.params.len();
        self.predicates.push(predicate.to_string());
        self.params.extend(params);
        debug_assert_eq!(count_placeholders(predicate), self.params.len() - before);
        self
    }

    pub fn and_if<I>(&mut self, condition: bool, predicate: &str, params: I) -> &mut Self
    where
        I: IntoIterator<Item = SqlValue>,
    {
        if condition {
            self.and(predicate, params);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

fn count_placeholders(sql: &str) -> usize {
    sql.matches('?').count()
}

/// `%term%` with LIKE metacharacters escaped for `ESCAPE '\'`.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
