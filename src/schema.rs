diesel::table! {
    appointments (id) {
        id -> BigInt,
        user_id -> BigInt,
        class_id -> BigInt,
        status -> Text,
        date -> Timestamp,
    }
}

diesel::table! {
    classes (id) {
        id -> BigInt,
        name -> Text,
        trainer_id -> Nullable<BigInt>,
        capacity -> Integer,
        booked -> Integer,
        schedule -> Timestamp,
        status -> Text,
    }
}

diesel::joinable!(appointments -> classes (class_id));

diesel::allow_tables_to_appear_in_same_query!(appointments, classes);
