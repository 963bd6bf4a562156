//! Storage module for uploaded media
//!
//! Talks to Supabase Storage through its S3-compatible endpoint.

mod supabase_storage;

pub use supabase_storage::SupabaseStorageClient;
