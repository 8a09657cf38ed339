use chrono::NaiveDate;
use shared::domain::{BudgetInput, BudgetView, UserInput, UserView};

use crate::CrudResource;

/// The `/usuario` collection.
pub struct Users;

impl CrudResource for Users {
    type View = UserView;
    type Input = UserInput;

    const BASE_PATH: &'static str = "/usuario";
    const LABEL: &'static str = "user";

    fn id(view: &UserView) -> i64 {
        view.id
    }

    fn input_from_view(view: &UserView) -> UserInput {
        UserInput::from_view(view)
    }

    fn set_field(input: &mut UserInput, field: &str, value: &str) -> bool {
        let slot = match field {
            "username" => &mut input.username,
            "email" => &mut input.email,
            "nome" => &mut input.nome,
            "cpf_cnpj" => &mut input.cpf_cnpj,
            "telefone" => &mut input.telefone,
            "tipo" => &mut input.tipo,
            "cep" => &mut input.cep,
            "endereco" => &mut input.endereco,
            "numero" => &mut input.numero,
            "descricaoPerfil" => &mut input.descricao_perfil,
            "fotoPerfil" => &mut input.foto_perfil,
            "senha" => &mut input.senha,
            _ => return false,
        };
        *slot = value.to_string();
        true
    }

    fn draft_problems(input: &UserInput) -> Vec<String> {
        let required = [
            ("username", &input.username),
            ("email", &input.email),
            ("nome", &input.nome),
            ("cpf_cnpj", &input.cpf_cnpj),
            ("senha", &input.senha),
        ];
        required
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| format!("{name} is required"))
            .collect()
    }

    fn summarize(view: &UserView) -> String {
        format!("#{} {} <{}>", view.id, view.nome, view.email)
    }
}

/// The `/orcamentos` collection.
pub struct Budgets;

impl CrudResource for Budgets {
    type View = BudgetView;
    type Input = BudgetInput;

    const BASE_PATH: &'static str = "/orcamentos";
    const LABEL: &'static str = "budget";

    fn id(view: &BudgetView) -> i64 {
        view.id
    }

    fn input_from_view(view: &BudgetView) -> BudgetInput {
        BudgetInput::from_view(view)
    }

    fn set_field(input: &mut BudgetInput, field: &str, value: &str) -> bool {
        let slot = match field {
            "valor" => &mut input.valor,
            "dataEntrega" => &mut input.data_entrega,
            "formaPagamento" => &mut input.forma_pagamento,
            "status" => &mut input.status,
            "idUsuario" => &mut input.id_usuario,
            "idProjeto" => &mut input.id_projeto,
            _ => return false,
        };
        *slot = value.to_string();
        true
    }

    fn draft_problems(input: &BudgetInput) -> Vec<String> {
        let required = [
            ("valor", &input.valor),
            ("dataEntrega", &input.data_entrega),
            ("formaPagamento", &input.forma_pagamento),
            ("status", &input.status),
            ("idUsuario", &input.id_usuario),
            ("idProjeto", &input.id_projeto),
        ];
        let mut problems: Vec<String> = required
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| format!("{name} is required"))
            .collect();

        if !input.data_entrega.trim().is_empty()
            && NaiveDate::parse_from_str(input.data_entrega.trim(), "%Y-%m-%d").is_err()
        {
            problems.push("dataEntrega must be YYYY-MM-DD".to_string());
        }
        problems
    }

    fn summarize(view: &BudgetView) -> String {
        format!(
            "#{} {} via {} [{}] user #{} project #{}",
            view.id,
            view.valor,
            view.forma_pagamento,
            view.status,
            view.usuario.id,
            view.projeto.id
        )
    }
}
