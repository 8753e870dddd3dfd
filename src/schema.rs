diesel::table! {
    appointment_schedulings (id) {
        id -> Integer,
        pediatrician_id -> Integer,
        time_start -> Timestamp,
        time_finish -> Timestamp,
        is_available -> Bool,
        created -> Timestamp,
        updated -> Timestamp,
    }
}

diesel::table! {
    appointments (id) {
        id -> Integer,
        user_id -> Integer,
        appointment_scheduling_id -> Integer,
        comments -> Text,
        created -> Timestamp,
        updated -> Timestamp,
    }
}

diesel::table! {
    auth_tokens (key) {
        key -> Text,
        user_id -> Integer,
        created -> Timestamp,
    }
}

diesel::table! {
    pediatricians (id) {
        id -> Integer,
        name -> Text,
        genre -> Text,
        created -> Timestamp,
        updated -> Timestamp,
    }
}

diesel::table! {
    users (id) {
        id -> Integer,
        email -> Text,
        name -> Text,
        password -> Text,
        is_active -> Bool,
        is_staff -> Bool,
        is_superuser -> Bool,
        last_login -> Nullable<Timestamp>,
        created -> Timestamp,
    }
}

diesel::joinable!(appointment_schedulings -> pediatricians (pediatrician_id));
diesel::joinable!(appointments -> appointment_schedulings (appointment_scheduling_id));
diesel::joinable!(appointments -> users (user_id));
diesel::joinable!(auth_tokens -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    appointment_schedulings,
    appointments,
    auth_tokens,
    pediatricians,
    users,
);
