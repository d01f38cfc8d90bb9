// Mirrors sql/schema.sql; id and uuid are generated by PostgreSQL on insert.
diesel::table! {
    users (id) {
        id -> BigInt,
        uuid -> Text,
        username -> Text,
        email -> Text,
        full_name -> Text,
    }
}
