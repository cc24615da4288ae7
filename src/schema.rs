table! {
    blog_categories (blog_id, category_id) {
        blog_id -> Int4,
        category_id -> Int4,
    }
}

table! {
    blogs (id) {
        id -> Int4,
        title -> Varchar,
        body -> Text,
        author_id -> Int4,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

table! {
    categories (id) {
        id -> Int4,
        name -> Varchar,
        description -> Text,
    }
}

table! {
    users (id) {
        id -> Int4,
        username -> Varchar,
        pass -> Varchar,
        is_staff -> Bool,
    }
}

joinable!(blog_categories -> blogs (blog_id));
joinable!(blog_categories -> categories (category_id));
joinable!(blogs -> users (author_id));

allow_tables_to_appear_in_same_query!(
    blog_categories,
    blogs,
    categories,
    users,
);
