//! Diesel schema for medical record persistence.

diesel::table! {
    /// Medical records owned by profiles.
    medical_records (id) {
        /// Record identifier.
        id -> Uuid,
        /// Owning profile.
        profile_id -> Uuid,
        /// Record title.
        #[max_length = 200]
        title -> Varchar,
        /// Document date.
        record_date -> Date,
        /// Free-text description.
        description -> Text,
        /// Image attachment reference.
        #[max_length = 500]
        image -> Nullable<Varchar>,
        /// Inline image payload.
        image_data -> Nullable<Text>,
        /// Analysis summary.
        analysis_summary -> Nullable<Text>,
        /// Analysis follow-up actions.
        analysis_actions -> Nullable<Text>,
        /// Analysis recommendations.
        analysis_recommendations -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
