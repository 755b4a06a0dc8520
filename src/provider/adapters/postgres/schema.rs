//! Diesel schema for provider persistence.

diesel::table! {
    /// Company profiles eligible to receive leads.
    company_profiles (id) {
        /// Provider identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Availability status (active or inactive).
        #[max_length = 50]
        status -> Varchar,
        /// Free-form matching tags.
        tags -> Array<Text>,
        /// Service categories.
        categories -> Array<Text>,
        /// Timestamp of the most recent committed lead.
        last_lead_assigned_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
