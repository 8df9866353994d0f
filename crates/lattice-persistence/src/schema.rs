//! Esquema Diesel (mantenido a mano junto a `migrations/`).

diesel::table! {
    lattices (dispatch_id) {
        dispatch_id -> Uuid,
        name -> Text,
        status -> Text,
        electron_num -> Integer,
        completed_electron_num -> Integer,
        storage_path -> Text,
        results_filename -> Nullable<Text>,
        inputs_filename -> Nullable<Text>,
        function_string_filename -> Nullable<Text>,
        executor -> Text,
        executor_data_filename -> Nullable<Text>,
        workflow_executor -> Text,
        workflow_executor_data_filename -> Nullable<Text>,
        error_filename -> Nullable<Text>,
        function_filename -> Nullable<Text>,
        transport_graph_filename -> Nullable<Text>,
        is_active -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        started_at -> Timestamptz,
        completed_at -> Nullable<Timestamptz>,
    }
}
