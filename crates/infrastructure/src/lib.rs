//! Infrastructure adapters for Rosterly: Postgres persistence, Argon2id
//! password hashing, and the HS256 token codec.

#![forbid(unsafe_code)]

mod argon2_password_hasher;
mod jwt_token_codec;
mod postgres_shift_repository;
mod postgres_user_repository;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use jwt_token_codec::JwtTokenCodec;
pub use postgres_shift_repository::PostgresShiftRepository;
pub use postgres_user_repository::PostgresUserRepository;
