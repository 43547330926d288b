//! SQL text. Statements are prepared per pooled connection through
//! `prepare_cached`, so nothing here is bound to a single client.

pub const COLUMNS: &str = "category_id, name, description, is_active, created_at";

pub const INSERT: &str = "insert into categories (category_id, name, description, is_active, created_at) \
     values ($1, $2, $3, $4, $5)";

pub const UPDATE: &str = "update categories \
     set name = $2, description = $3, is_active = $4, created_at = $5 \
     where category_id = $1";

pub const DELETE: &str = "delete from categories where category_id = $1";

pub const GET: &str = "select category_id, name, description, is_active, created_at \
     from categories where category_id = $1";

pub const LIST: &str = "select category_id, name, description, is_active, created_at \
     from categories order by created_at asc";

pub const COUNT_MATCHING: &str =
    "select count(*) as total from categories where ($1::text is null or name ilike $1)";

/// Sortable columns. Anything else falls back to `created_at desc`.
pub const SORTABLE_FIELDS: &[&str] = &["name", "created_at"];

/// Text columns compare bytewise (`collate "C"`), matching `str::cmp`.
const TEXT_FIELDS: &[&str] = &["name"];

/// `column` and `direction` must come from [`SORTABLE_FIELDS`] and
/// `SortDirection`; they are interpolated, not bound. Ties fall back to
/// newest first, then id, so pages never overlap.
pub fn search(column: &str, direction: &str) -> String {
    let collation = if TEXT_FIELDS.iter().any(|f| *f == column) {
        " collate \"C\""
    } else {
        ""
    };
    let tiebreak = if column == "created_at" {
        "category_id"
    } else {
        "created_at desc, category_id"
    };
    format!(
        "select {COLUMNS} from categories \
         where ($1::text is null or name ilike $1) \
         order by {column}{collation} {direction}, {tiebreak} \
         offset $2 limit $3"
    )
}

/// `%`-wrapped ILIKE pattern with the user's wildcards escaped.
pub fn contains_pattern(filter: &str) -> String {
    let mut escaped = String::with_capacity(filter.len() + 2);
    escaped.push('%');
    for c in filter.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
