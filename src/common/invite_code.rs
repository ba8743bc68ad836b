// src/common/invite_code.rs

use rand::Rng;

pub const INVITE_CODE_LEN: usize = 8;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Código público da turma (calendário, diretório, formulário dos pais).
/// Não é segredo forte: só libera leitura e o cadastro do próprio filho.
pub fn generate_invite_code() -> String {
    let mut rng = rand::thread_rng();
    (0..INVITE_CODE_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Códigos chegam pela URL; aceitamos maiúsculas e espaços nas pontas.
pub fn normalize_invite_code(raw: &str) -> Option<String> {
    let code = raw.trim().to_ascii_lowercase();
    let valid = code.len() == INVITE_CODE_LEN && code.bytes().all(|b| ALPHABET.contains(&b));
    valid.then_some(code)
}
