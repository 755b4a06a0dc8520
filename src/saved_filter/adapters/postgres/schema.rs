//! Diesel schema for saved filter persistence.

diesel::table! {
    /// Named lead filter presets, at most one default per user.
    user_lead_filters (id) {
        /// Filter identifier.
        id -> Uuid,
        /// Owning user.
        user_id -> Uuid,
        /// Display name.
        #[max_length = 100]
        filter_name -> Varchar,
        /// Raw query options.
        filter_data -> Jsonb,
        /// Default flag.
        is_default -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
