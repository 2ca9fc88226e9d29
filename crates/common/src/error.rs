/// Erros de decodificação do corpo de uma requisição de escrita.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("payload inválido: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("ttl negativo: {0}")]
    NegativeTtl(i64),
}
