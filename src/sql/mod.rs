//! SQL text for the blog tables: identifiers come from validated config only, values are bound as parameters.

pub const USERS: &str = "users";
pub const POSTS: &str = "posts";
pub const TAGS: &str = "tags";

const USER_COLUMNS: &str = "id, email, first_name, last_name";
const POST_COLUMNS: &str = "id, title, content, published, author_id";
const TAG_COLUMNS: &str = "id, title, post_id";

/// Quote identifier for PostgreSQL.
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
pub fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

/// Every statement the repository issues, rendered once for a schema.
#[derive(Clone, Debug)]
pub struct Statements {
    pub select_user: String,
    pub select_post: String,
    pub posts_by_author: String,
    pub tags_by_post: String,
    pub insert_user: String,
    pub insert_post: String,
    pub insert_tag: String,
    pub delete_post: String,
    pub delete_posts_by_author: String,
    pub delete_user: String,
}

impl Statements {
    pub fn new(schema: &str) -> Self {
        let users = qualified_table(schema, USERS);
        let posts = qualified_table(schema, POSTS);
        let tags = qualified_table(schema, TAGS);
        Statements {
            select_user: format!("SELECT {} FROM {} WHERE id = $1", USER_COLUMNS, users),
            select_post: format!("SELECT {} FROM {} WHERE id = $1", POST_COLUMNS, posts),
            posts_by_author: format!(
                "SELECT {} FROM {} WHERE author_id = $1 ORDER BY id",
                POST_COLUMNS, posts
            ),
            tags_by_post: format!(
                "SELECT {} FROM {} WHERE post_id = $1 ORDER BY id",
                TAG_COLUMNS, tags
            ),
            insert_user: format!(
                "INSERT INTO {} (email, first_name, last_name) VALUES ($1, $2, $3) RETURNING {}",
                users, USER_COLUMNS
            ),
            insert_post: format!(
                "INSERT INTO {} (title, content, published, author_id) VALUES ($1, $2, $3, $4) RETURNING {}",
                posts, POST_COLUMNS
            ),
            insert_tag: format!(
                "INSERT INTO {} (title, post_id) VALUES ($1, $2) RETURNING {}",
                tags, TAG_COLUMNS
            ),
            delete_post: format!("DELETE FROM {} WHERE id = $1 RETURNING {}", posts, POST_COLUMNS),
            delete_posts_by_author: format!("DELETE FROM {} WHERE author_id = $1", posts),
            delete_user: format!("DELETE FROM {} WHERE id = $1 RETURNING {}", users, USER_COLUMNS),
        }
    }
}
