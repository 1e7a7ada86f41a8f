//! Diesel schema for profile persistence.

diesel::table! {
    /// Profiles owning medical records and tasks.
    profiles (id) {
        /// Profile identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 100]
        name -> Varchar,
        /// Relationship to the account holder.
        #[max_length = 100]
        relationship -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
