#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Packing(#[from] packed_struct::PackingError),

    #[error(transparent)]
    Message(#[from] message::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
