//! Diesel schema for job persistence.

diesel::table! {
    /// Scheduled driver jobs.
    driver_jobs (id) {
        /// Job identifier.
        id -> Uuid,
        /// Driver label, e.g. `Driver 3`.
        #[max_length = 16]
        driver -> Varchar,
        /// Scheduled calendar day.
        job_date -> Date,
        /// Kind of work.
        #[max_length = 255]
        job_type -> Varchar,
        /// Optional site postcode.
        #[max_length = 32]
        postcode -> Nullable<Varchar>,
        /// Optional price in pence.
        price_pence -> Nullable<Int8>,
        /// Completion status label.
        #[max_length = 32]
        status -> Varchar,
        /// Free-form notes.
        notes -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Insertion sequence, used to order jobs created together.
        seq -> Int8,
    }
}
