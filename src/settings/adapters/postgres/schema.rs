//! Diesel schema for settings persistence.

diesel::table! {
    /// Versioned distribution settings, one history per scope.
    lead_settings (scope_key, version) {
        /// `global` or the company UUID.
        #[max_length = 64]
        scope_key -> Varchar,
        /// Company the settings apply to, if scoped.
        company_id -> Nullable<Uuid>,
        /// Position in the scope's history, starting at 1.
        version -> Int8,
        /// Serialized snapshot.
        settings -> Jsonb,
        /// Write timestamp.
        recorded_at -> Timestamptz,
    }
}
