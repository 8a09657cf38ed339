use serde::{Deserialize, Deserializer, Serialize};

/// Read shape of a user row. The server may omit `senha` on reads, and
/// older rows can miss optional profile fields, so every non-id field
/// defaults to the empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserView {
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub cpf_cnpj: String,
    #[serde(default)]
    pub telefone: String,
    #[serde(default)]
    pub tipo: String,
    #[serde(default)]
    pub cep: String,
    #[serde(default)]
    pub endereco: String,
    #[serde(default)]
    pub numero: String,
    #[serde(rename = "descricaoPerfil", default)]
    pub descricao_perfil: String,
    #[serde(rename = "fotoPerfil", default)]
    pub foto_perfil: String,
    #[serde(default)]
    pub senha: String,
}

/// Write shape of a user: the full field set, no id. Also doubles as the
/// draft the operator edits, which is why every field carries an explicit
/// empty-string default instead of being optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub cpf_cnpj: String,
    #[serde(default)]
    pub telefone: String,
    #[serde(default)]
    pub tipo: String,
    #[serde(default)]
    pub cep: String,
    #[serde(default)]
    pub endereco: String,
    #[serde(default)]
    pub numero: String,
    #[serde(rename = "descricaoPerfil", default)]
    pub descricao_perfil: String,
    #[serde(rename = "fotoPerfil", default)]
    pub foto_perfil: String,
    #[serde(default)]
    pub senha: String,
}

impl UserInput {
    /// Copies a listed row into an editable draft, field for field.
    pub fn from_view(view: &UserView) -> Self {
        Self {
            username: view.username.clone(),
            email: view.email.clone(),
            nome: view.nome.clone(),
            cpf_cnpj: view.cpf_cnpj.clone(),
            telefone: view.telefone.clone(),
            tipo: view.tipo.clone(),
            cep: view.cep.clone(),
            endereco: view.endereco.clone(),
            numero: view.numero.clone(),
            descricao_perfil: view.descricao_perfil.clone(),
            foto_perfil: view.foto_perfil.clone(),
            senha: view.senha.clone(),
        }
    }
}

/// Referenced user as nested inside a budget row. Only the id matters for
/// editing; the name is kept for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: i64,
    #[serde(default)]
    pub nome: String,
}

/// Referenced project as nested inside a budget row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: i64,
    #[serde(default)]
    pub nome: String,
}

/// Read shape of a budget ("orçamento") row. Reads nest the referenced
/// user and project as objects; writes use flat foreign keys instead, so
/// this type never goes back over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetView {
    pub id: i64,
    #[serde(deserialize_with = "amount_as_string", default)]
    pub valor: String,
    #[serde(rename = "dataEntrega", default)]
    pub data_entrega: String,
    #[serde(rename = "formaPagamento", default)]
    pub forma_pagamento: String,
    #[serde(default)]
    pub status: String,
    pub usuario: UserRef,
    pub projeto: ProjectRef,
}

/// Write shape of a budget: flat `idUsuario`/`idProjeto` foreign keys.
/// Values are strings because they originate from operator input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetInput {
    #[serde(deserialize_with = "amount_as_string", default)]
    pub valor: String,
    #[serde(rename = "dataEntrega", default)]
    pub data_entrega: String,
    #[serde(rename = "formaPagamento", default)]
    pub forma_pagamento: String,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "idUsuario", default)]
    pub id_usuario: String,
    #[serde(rename = "idProjeto", default)]
    pub id_projeto: String,
}

impl BudgetInput {
    /// Flattens a listed row into the write shape: `usuario.id` becomes
    /// `idUsuario` and `projeto.id` becomes `idProjeto`. The write
    /// endpoint only accepts flat foreign keys, so this mapping is the
    /// single place the read/write asymmetry is bridged.
    pub fn from_view(view: &BudgetView) -> Self {
        Self {
            valor: view.valor.clone(),
            data_entrega: view.data_entrega.clone(),
            forma_pagamento: view.forma_pagamento.clone(),
            status: view.status.clone(),
            id_usuario: view.usuario.id.to_string(),
            id_projeto: view.projeto.id.to_string(),
        }
    }
}

/// The server transmits `valor` as either a JSON string or a bare number.
/// Both are kept as their textual form.
fn amount_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Amount::deserialize(deserializer)? {
        Amount::Text(text) => text,
        Amount::Number(number) => number.to_string(),
    })
}
