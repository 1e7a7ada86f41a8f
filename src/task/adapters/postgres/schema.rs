//! Diesel schema for task persistence.

diesel::table! {
    /// Kanban tasks owned by profiles.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning profile.
        profile_id -> Uuid,
        /// Task title.
        #[max_length = 200]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Status column.
        #[max_length = 20]
        status -> Varchar,
        /// Zero-based position within the status column.
        position -> Int4,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
