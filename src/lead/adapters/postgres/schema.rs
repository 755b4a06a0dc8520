//! Diesel schema for lead persistence.

diesel::table! {
    /// Inbound service requests.
    leads (id) {
        /// Lead identifier.
        id -> Uuid,
        /// Short job title.
        title -> Text,
        /// Free-text description.
        description -> Nullable<Text>,
        /// Service category.
        #[max_length = 100]
        category -> Varchar,
        /// Tier label.
        #[max_length = 50]
        lead_type -> Varchar,
        /// Raw status value.
        #[max_length = 50]
        status -> Varchar,
        /// Submitting user.
        submitted_by -> Nullable<Uuid>,
        /// Owning provider once assigned.
        company_id -> Nullable<Uuid>,
        /// Customer name.
        customer_name -> Nullable<Text>,
        /// Customer e-mail.
        customer_email -> Nullable<Text>,
        /// Customer phone number.
        customer_phone -> Nullable<Text>,
        /// Service type.
        service_type -> Nullable<Text>,
        /// Wizard answers as a JSON object.
        metadata -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only assignment audit trail.
    lead_history (id) {
        /// Entry identifier.
        id -> Uuid,
        /// Lead that was assigned.
        lead_id -> Uuid,
        /// Provider the lead went to.
        assigned_to -> Uuid,
        /// Assignment method (auto or manual).
        #[max_length = 20]
        method -> Varchar,
        /// Status before the assignment.
        #[max_length = 50]
        previous_status -> Varchar,
        /// Status after the assignment.
        #[max_length = 50]
        new_status -> Varchar,
        /// Strategy, reasoning and timestamp as JSON.
        metadata -> Jsonb,
        /// Write timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(lead_history -> leads (lead_id));
diesel::allow_tables_to_appear_in_same_query!(leads, lead_history);
