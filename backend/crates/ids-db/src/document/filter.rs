use std::fmt;

/// Query predicate over the documents of one collection.
///
/// Field names are top-level document fields; values compare as text.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    All,
    IdEq(String),
    IdNe(String),
    Eq(&'static str, String),
    /// Matches documents where the field is `null` or missing.
    IsNull(&'static str),
    /// Matches documents whose array field holds at least one element with
    /// every listed `(field, value)` pair.
    ElemMatch(&'static str, Vec<(&'static str, String)>),
    And(Vec<Filter>),
}

impl Filter {
    pub fn id_eq(id: impl Into<String>) -> Self {
        Self::IdEq(id.into())
    }

    pub fn id_ne(id: impl Into<String>) -> Self {
        Self::IdNe(id.into())
    }

    pub fn eq(field: &'static str, value: impl Into<String>) -> Self {
        Self::Eq(field, value.into())
    }

    /// `Eq` for a present value, `IsNull` for an absent one.
    pub fn eq_opt(field: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(value) => Self::Eq(field, value.to_string()),
            None => Self::IsNull(field),
        }
    }

    pub fn elem_match(array: &'static str, conditions: Vec<(&'static str, String)>) -> Self {
        Self::ElemMatch(array, conditions)
    }

    pub fn and(self, other: Filter) -> Self {
        match self {
            Self::And(mut filters) => {
                filters.push(other);
                Self::And(filters)
            }
            first => Self::And(vec![first, other]),
        }
    }

    /// Renders the predicate as a SQL boolean expression over the `id` and
    /// `body` columns, returning the positional parameters in order.
    pub fn to_sql(&self) -> (String, Vec<String>) {
        let mut sql = String::new();
        let mut params = Vec::new();
        self.render(&mut sql, &mut params);
        (sql, params)
    }

    fn render(&self, sql: &mut String, params: &mut Vec<String>) {
        match self {
            Self::All => sql.push_str("1 = 1"),
            Self::IdEq(id) => {
                sql.push_str("id = ?");
                params.push(id.clone());
            }
            Self::IdNe(id) => {
                sql.push_str("id <> ?");
                params.push(id.clone());
            }
            Self::Eq(field, value) => {
                sql.push_str("json_extract(body, ?) = ?");
                params.push(json_path(field));
                params.push(value.clone());
            }
            Self::IsNull(field) => {
                sql.push_str("json_extract(body, ?) IS NULL");
                params.push(json_path(field));
            }
            Self::ElemMatch(array, conditions) => {
                sql.push_str("EXISTS (SELECT 1 FROM json_each(body, ?) AS elem WHERE 1 = 1");
                params.push(json_path(array));
                for (field, value) in conditions {
                    sql.push_str(" AND json_extract(elem.value, ?) = ?");
                    params.push(json_path(field));
                    params.push(value.clone());
                }
                sql.push(')');
            }
            Self::And(filters) if filters.is_empty() => sql.push_str("1 = 1"),
            Self::And(filters) => {
                for (i, filter) in filters.iter().enumerate() {
                    if i > 0 {
                        sql.push_str(" AND ");
                    }
                    sql.push('(');
                    filter.render(sql, params);
                    sql.push(')');
                }
            }
        }
    }
}

fn json_path(field: &str) -> String {
    format!("$.{field}")
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "{{}}"),
            Self::IdEq(id) => write!(f, "{{id: '{id}'}}"),
            Self::IdNe(id) => write!(f, "{{id: {{$ne: '{id}'}}}}"),
            Self::Eq(field, value) => write!(f, "{{{field}: '{value}'}}"),
            Self::IsNull(field) => write!(f, "{{{field}: null}}"),
            Self::ElemMatch(array, conditions) => {
                let parts: Vec<String> = conditions
                    .iter()
                    .map(|(field, value)| format!("{field}: '{value}'"))
                    .collect();
                write!(f, "{{{array}: {{$elemMatch: {{{}}}}}}}", parts.join(", "))
            }
            Self::And(filters) => {
                let parts: Vec<String> = filters.iter().map(ToString::to_string).collect();
                write!(f, "{{$and: [{}]}}", parts.join(", "))
            }
        }
    }
}
