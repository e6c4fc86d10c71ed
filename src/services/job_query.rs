//! Translates listing parameters into a parameterized plan for the `jobs`
//! table.
//!
//! Everything that ends up in the SQL text (column names, operators, sort
//! direction) comes from the closed enums below. User input only ever travels
//! as a bound parameter.

use sqlx::{QueryBuilder, Sqlite};

use crate::dto::job_dto::JobListQuery;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Title,
    SalaryMin,
    SalaryMax,
    Company,
}

impl SortField {
    /// Unknown or missing values sort by creation time.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some("created_at") => SortField::CreatedAt,
            Some("updated_at") => SortField::UpdatedAt,
            Some("title") => SortField::Title,
            Some("salary_min") => SortField::SalaryMin,
            Some("salary_max") => SortField::SalaryMax,
            Some("company") => SortField::Company,
            _ => SortField::CreatedAt,
        }
    }

    pub const fn column(self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
            SortField::Title => "title",
            SortField::SalaryMin => "salary_min",
            SortField::SalaryMax => "salary_max",
            SortField::Company => "company",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// `order=asc` (any case) sorts descending; every other value, including
    /// none at all, sorts ascending. Existing clients depend on this mapping.
    pub fn from_order_param(raw: Option<&str>) -> Self {
        match raw {
            Some(order) if order.eq_ignore_ascii_case("asc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }

    pub const fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterColumn {
    Title,
    Location,
    Company,
    Type,
    Level,
    Status,
    SalaryMin,
    SalaryMax,
}

impl FilterColumn {
    pub const fn as_str(self) -> &'static str {
        match self {
            FilterColumn::Title => "title",
            FilterColumn::Location => "location",
            FilterColumn::Company => "company",
            FilterColumn::Type => "type",
            FilterColumn::Level => "level",
            FilterColumn::Status => "status",
            FilterColumn::SalaryMin => "salary_min",
            FilterColumn::SalaryMax => "salary_max",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Contains,
    Equals,
    AtMost,
}

impl Comparison {
    pub const fn operator(self) -> &'static str {
        match self {
            Comparison::Contains => "LIKE",
            Comparison::Equals => "=",
            Comparison::AtMost => "<=",
        }
    }
}

/// A value bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Text(String),
    Real(f64),
}

impl SqlValue {
    pub fn bind_to(&self, builder: &mut QueryBuilder<'_, Sqlite>) {
        match self {
            SqlValue::Null => {
                builder.push_bind(None::<String>);
            }
            SqlValue::Text(value) => {
                builder.push_bind(value.clone());
            }
            SqlValue::Real(value) => {
                builder.push_bind(*value);
            }
        }
    }
}

impl From<Option<String>> for SqlValue {
    fn from(value: Option<String>) -> Self {
        value.map(SqlValue::Text).unwrap_or(SqlValue::Null)
    }
}

impl From<Option<f64>> for SqlValue {
    fn from(value: Option<f64>) -> Self {
        value.map(SqlValue::Real).unwrap_or(SqlValue::Null)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: FilterColumn,
    pub comparison: Comparison,
    pub value: SqlValue,
}

impl Predicate {
    fn contains(column: FilterColumn, needle: &str) -> Self {
        Self {
            column,
            comparison: Comparison::Contains,
            value: SqlValue::Text(format!("%{}%", needle)),
        }
    }

    fn equals(column: FilterColumn, value: &str) -> Self {
        Self {
            column,
            comparison: Comparison::Equals,
            value: SqlValue::Text(value.to_string()),
        }
    }

    fn at_most(column: FilterColumn, bound: f64) -> Self {
        Self {
            column,
            comparison: Comparison::AtMost,
            value: SqlValue::Real(bound),
        }
    }

    fn sql(&self) -> String {
        format!("{} {} ?", self.column.as_str(), self.comparison.operator())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub predicates: Vec<Predicate>,
    pub sort: SortField,
    pub direction: SortDirection,
    pub page: i64,
    pub limit: i64,
    pub offset: i64,
}

impl QueryPlan {
    pub fn from_query(query: &JobListQuery) -> Self {
        let page = positive_int(query.page.as_deref()).unwrap_or(DEFAULT_PAGE);
        let limit = positive_int(query.limit.as_deref()).unwrap_or(DEFAULT_LIMIT);
        let offset = (page - 1).saturating_mul(limit);

        let mut predicates = Vec::new();

        if let Some(search) = present(&query.search) {
            predicates.push(Predicate::contains(FilterColumn::Title, search));
        }
        if let Some(location) = present(&query.location) {
            predicates.push(Predicate::contains(FilterColumn::Location, location));
        }
        if let Some(job_type) = present(&query.job_type) {
            predicates.push(Predicate::equals(FilterColumn::Type, job_type));
        }
        if let Some(level) = present(&query.level) {
            predicates.push(Predicate::equals(FilterColumn::Level, level));
        }
        if let Some(status) = present(&query.status) {
            predicates.push(Predicate::equals(FilterColumn::Status, status));
        }
        // Both salary filters are upper bounds on their own column.
        if let Some(bound) = number(&query.salary_min) {
            predicates.push(Predicate::at_most(FilterColumn::SalaryMin, bound));
        }
        if let Some(bound) = number(&query.salary_max) {
            predicates.push(Predicate::at_most(FilterColumn::SalaryMax, bound));
        }
        if let Some(company) = present(&query.company) {
            predicates.push(Predicate::contains(FilterColumn::Company, company));
        }

        Self {
            predicates,
            sort: SortField::from_param(query.sort.as_deref()),
            direction: SortDirection::from_order_param(query.order.as_deref()),
            page,
            limit,
            offset,
        }
    }

    pub fn where_clause(&self) -> String {
        if self.predicates.is_empty() {
            return String::new();
        }
        let conditions: Vec<String> = self.predicates.iter().map(Predicate::sql).collect();
        format!("WHERE {}", conditions.join(" AND "))
    }

    pub fn order_clause(&self) -> String {
        format!("ORDER BY {} {}", self.sort.column(), self.direction.as_sql())
    }

    pub fn params(&self) -> Vec<&SqlValue> {
        self.predicates.iter().map(|p| &p.value).collect()
    }

    /// Appends the WHERE clause with its bound values, so the count and the
    /// page query always see the same predicates.
    pub fn push_filters(&self, builder: &mut QueryBuilder<'_, Sqlite>) {
        for (index, predicate) in self.predicates.iter().enumerate() {
            builder.push(if index == 0 { " WHERE " } else { " AND " });
            builder
                .push(predicate.column.as_str())
                .push(" ")
                .push(predicate.comparison.operator())
                .push(" ");
            predicate.value.bind_to(builder);
        }
    }

    pub fn push_page(&self, builder: &mut QueryBuilder<'_, Sqlite>) {
        builder.push(" ").push(self.order_clause());
        builder.push(" LIMIT ").push_bind(self.limit);
        builder.push(" OFFSET ").push_bind(self.offset);
    }

    pub fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            0
        } else {
            (total - 1) / self.limit + 1
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn positive_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v > 0)
}

fn number(raw: &Option<String>) -> Option<f64> {
    present(raw)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
