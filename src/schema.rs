diesel::table! {
    cookbook_entries (user_id, recipe_id) {
        user_id -> Uuid,
        recipe_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    recipes (id) {
        id -> Uuid,
        user_id -> Uuid,
        #[max_length = 255]
        name -> Varchar,
        description -> Text,
        instructions -> Text,
        image -> Nullable<Bytea>,
        tags -> Jsonb,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    sessions (id) {
        id -> Uuid,
        user_id -> Uuid,
        #[max_length = 255]
        token_hash -> Varchar,
        expires_at -> Timestamptz,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    try_list_entries (user_id, recipe_id) {
        user_id -> Uuid,
        recipe_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    users (id) {
        id -> Uuid,
        #[max_length = 255]
        username -> Varchar,
        #[max_length = 255]
        email -> Varchar,
        #[max_length = 255]
        first_name -> Varchar,
        #[max_length = 255]
        last_name -> Varchar,
        #[max_length = 255]
        password_hash -> Varchar,
        created_at -> Timestamptz,
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::joinable!(cookbook_entries -> recipes (recipe_id));
diesel::joinable!(cookbook_entries -> users (user_id));
diesel::joinable!(recipes -> users (user_id));
diesel::joinable!(sessions -> users (user_id));
diesel::joinable!(try_list_entries -> recipes (recipe_id));
diesel::joinable!(try_list_entries -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    cookbook_entries,
    recipes,
    sessions,
    try_list_entries,
    users,
);
