use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, header},
};
use imoveis_domain::imovel::ImovelId;
use imoveis_infra::{InfraError, mock::MockImovelRepository};
use pretty_assertions::assert_eq;
use tower::ServiceExt;

use super::*;
use crate::app::build_router;

// テスト用のスタブ実装

/// すべての操作が SQL 実行失敗を返すリポジトリ
struct FailingImovelRepository;

#[async_trait]
impl ImovelRepository for FailingImovelRepository {
    async fn find_all(&self) -> Result<Vec<Imovel>, InfraError> {
        Err(InfraError::unexpected("syntax error"))
    }

    async fn find_by_id(&self, _id: ImovelId) -> Result<Option<Imovel>, InfraError> {
        Err(InfraError::unexpected("syntax error"))
    }

    async fn find_by_tipo(&self, _tipo: &str) -> Result<Vec<Imovel>, InfraError> {
        Err(InfraError::unexpected("syntax error"))
    }

    async fn insert(&self, _data: &ImovelData) -> Result<ImovelId, InfraError> {
        Err(InfraError::unexpected("syntax error"))
    }

    async fn update(&self, _id: ImovelId, _data: &ImovelData) -> Result<(), InfraError> {
        Err(InfraError::unexpected("syntax error"))
    }

    async fn delete(&self, _id: ImovelId) -> Result<(), InfraError> {
        Err(InfraError::unexpected("syntax error"))
    }
}

// テストヘルパー

fn create_test_app(repository: impl ImovelRepository + 'static) -> Router {
    build_router(Arc::new(ImovelState {
        repository: Arc::new(repository),
    }))
}

fn seed_imovel() -> Imovel {
    Imovel::new(
        ImovelId::from_i64(1),
        ImovelData {
            logradouro:      "Ronaldo".into(),
            tipo_logradouro: "Rua".into(),
            bairro:          "Moema".into(),
            cidade:          "Sao Paulo".into(),
            cep:             ScalarValue::Integer(12345),
            tipo:            "apartamento".into(),
            valor:           ScalarValue::Decimal(10000.42),
            data_aquisicao:  "2014-11-23".into(),
        },
    )
}

fn casa(id: i64) -> Imovel {
    Imovel::new(
        ImovelId::from_i64(id),
        ImovelData {
            logradouro:      "Nicole Common".into(),
            tipo_logradouro: "Travessa".into(),
            bairro:          "Lake Danielle".into(),
            cidade:          "Judymouth".into(),
            cep:             ScalarValue::Text("85184".to_string()),
            tipo:            "casa em condominio".into(),
            valor:           ScalarValue::Decimal(488423.52),
            data_aquisicao:  "2017-07-29".into(),
        },
    )
}

const VALID_BODY: &str = r#"{
    "logradouro": "Nicole Common",
    "tipo_logradouro": "Travessa",
    "bairro": "Lake Danielle",
    "cidade": "Judymouth",
    "cep": "85184",
    "tipo": "casa em condominio",
    "valor": "300000",
    "data_aquisicao": "2017-07-29"
}"#;

fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

// --- GET /imoveis ---

#[tokio::test]
async fn test_list_imoveis_全件を格納順に返す() {
    // Given
    let sut = create_test_app(MockImovelRepository::with_imoveis(vec![
        seed_imovel(),
        casa(2),
    ]));

    // When
    let response = sut.oneshot(request(Method::GET, "/imoveis")).await.unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let ids: Vec<i64> = json["imoveis"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn test_list_imoveis_0件なら404() {
    // Given
    let sut = create_test_app(MockImovelRepository::new());

    // When
    let response = sut.oneshot(request(Method::GET, "/imoveis")).await.unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_string(response).await,
        r#"{"erro":"Nenhum imovel encontrado"}"#
    );
}

// --- GET /imoveis/{id} ---

#[tokio::test]
async fn test_get_imovel_カラム順のjsonを1要素の配列で返す() {
    // Given
    let sut = create_test_app(MockImovelRepository::with_imoveis(vec![
        seed_imovel(),
        casa(2),
    ]));

    // When
    let response = sut.oneshot(request(Method::GET, "/imoveis/1")).await.unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_string(response).await,
        concat!(
            r#"{"imoveis":[{"id":1,"logradouro":"Ronaldo","tipo_logradouro":"Rua","#,
            r#""bairro":"Moema","cidade":"Sao Paulo","cep":12345,"tipo":"apartamento","#,
            r#""valor":10000.42,"data_aquisicao":"2014-11-23"}]}"#,
        )
    );
}

#[tokio::test]
async fn test_get_imovel_存在しないidは404() {
    // Given
    let sut = create_test_app(MockImovelRepository::with_imoveis(vec![seed_imovel()]));

    // When
    let response = sut.oneshot(request(Method::GET, "/imoveis/99")).await.unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_string(response).await,
        r#"{"erro":"Nenhum imovel encontrado"}"#
    );
}

#[tokio::test]
async fn test_get_imovel_整数でないidはルート不一致の404() {
    for uri in ["/imoveis/abc", "/imoveis/-1", "/imoveis/1.5"] {
        // Given
        let sut = create_test_app(MockImovelRepository::with_imoveis(vec![seed_imovel()]));

        // When
        let response = sut.oneshot(request(Method::GET, uri)).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(
            body_string(response).await,
            r#"{"erro":"Recurso nao encontrado"}"#,
            "{uri}"
        );
    }
}

// --- GET /imoveis/tipo/{tipo} ---

#[tokio::test]
async fn test_list_imoveis_by_tipo_一致する物件のみ返す() {
    // Given
    let sut = create_test_app(MockImovelRepository::with_imoveis(vec![
        seed_imovel(),
        casa(2),
    ]));

    // When
    let response = sut
        .oneshot(request(Method::GET, "/imoveis/tipo/apartamento"))
        .await
        .unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let imoveis = json["imoveis"].as_array().unwrap();
    assert_eq!(imoveis.len(), 1);
    assert_eq!(imoveis[0]["tipo"], "apartamento");
}

#[tokio::test]
async fn test_list_imoveis_by_tipo_一致がなければ404() {
    // Given
    let sut = create_test_app(MockImovelRepository::with_imoveis(vec![seed_imovel()]));

    // When
    let response = sut
        .oneshot(request(Method::GET, "/imoveis/tipo/terreno"))
        .await
        .unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_string(response).await,
        r#"{"erro":"Nenhum imovel encontrado"}"#
    );
}

// --- POST /imoveis ---

#[tokio::test]
async fn test_create_imovel_200と作成メッセージを返す() {
    // Given
    let repository = MockImovelRepository::new();
    let sut = create_test_app(repository.clone());

    // When
    let response = sut
        .oneshot(json_request(Method::POST, "/imoveis", VALID_BODY))
        .await
        .unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_string(response).await,
        r#"{"mensagem":"imovel criado com sucesso"}"#
    );
    let stored = repository.snapshot();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].data().valor, ScalarValue::Text("300000".to_string()));
}

#[tokio::test]
async fn test_create_imovel_フィールド欠落は400() {
    // Given
    let repository = MockImovelRepository::new();
    let sut = create_test_app(repository.clone());
    let body = r#"{"logradouro": "Nicole Common", "tipo_logradouro": "Travessa"}"#;

    // When
    let response = sut
        .oneshot(json_request(Method::POST, "/imoveis", body))
        .await
        .unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    let erro = json["erro"].as_str().unwrap();
    assert!(erro.starts_with("Requisicao invalida: "), "{erro}");
    assert!(erro.contains("bairro"), "{erro}");
    assert!(repository.snapshot().is_empty());
}

#[tokio::test]
async fn test_create_imovel_jsonでないボディは400() {
    // Given
    let sut = create_test_app(MockImovelRepository::new());

    // When
    let response = sut
        .oneshot(json_request(Method::POST, "/imoveis", "not json"))
        .await
        .unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_imovel_値の型にかかわらず全キーがあれば200() {
    let bodies = [
        VALID_BODY.replace(r#""tipo": "casa em condominio""#, r#""tipo": 1"#),
        VALID_BODY.replace(r#""data_aquisicao": "2017-07-29""#, r#""data_aquisicao": 20170729"#),
        VALID_BODY.replace(r#""cep": "85184""#, r#""cep": null"#),
        VALID_BODY.replace(r#""bairro": "Lake Danielle""#, r#""bairro": true"#),
    ];

    for body in bodies {
        // Given
        let repository = MockImovelRepository::new();
        let sut = create_test_app(repository.clone());

        // When
        let response = sut
            .oneshot(json_request(Method::POST, "/imoveis", &body))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK, "{body}");
        assert_eq!(repository.snapshot().len(), 1, "{body}");
    }
}

// --- PUT /imoveis/{id} ---

#[tokio::test]
async fn test_update_imovel_201と更新メッセージを返し全フィールドを置き換える() {
    // Given
    let repository = MockImovelRepository::with_imoveis(vec![seed_imovel()]);
    let sut = create_test_app(repository.clone());

    // When
    let response = sut
        .oneshot(json_request(Method::PUT, "/imoveis/1", VALID_BODY))
        .await
        .unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        body_string(response).await,
        r#"{"mensagem":"imovel atualizado com sucesso"}"#
    );
    let stored = repository.snapshot();
    assert_eq!(stored[0].id(), ImovelId::from_i64(1));
    assert_eq!(stored[0].data().logradouro, ScalarValue::from("Nicole Common"));
    assert_eq!(stored[0].data().cep, ScalarValue::Text("85184".to_string()));
}

#[tokio::test]
async fn test_update_imovel_存在しないidでも201() {
    // Given
    let sut = create_test_app(MockImovelRepository::new());

    // When
    let response = sut
        .oneshot(json_request(Method::PUT, "/imoveis/42", VALID_BODY))
        .await
        .unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_update_imovel_nullや数値の値もそのまま保存して201() {
    // Given
    let repository = MockImovelRepository::with_imoveis(vec![seed_imovel()]);
    let sut = create_test_app(repository.clone());
    let body = VALID_BODY
        .replace(r#""cep": "85184""#, r#""cep": null"#)
        .replace(r#""tipo": "casa em condominio""#, r#""tipo": 2"#);

    // When
    let response = sut
        .oneshot(json_request(Method::PUT, "/imoveis/1", &body))
        .await
        .unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::CREATED);
    let stored = repository.snapshot();
    assert_eq!(stored[0].data().cep, ScalarValue::Null);
    assert_eq!(stored[0].data().tipo, ScalarValue::Integer(2));
}

#[tokio::test]
async fn test_get_imovel_nullのフィールドはnullで返す() {
    // Given
    let (id, data) = seed_imovel().into_parts();
    let sut = create_test_app(MockImovelRepository::with_imoveis(vec![Imovel::new(
        id,
        ImovelData {
            cep: ScalarValue::Null,
            ..data
        },
    )]));

    // When
    let response = sut.oneshot(request(Method::GET, "/imoveis/1")).await.unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["imoveis"][0]["cep"], serde_json::Value::Null);
    assert_eq!(json["imoveis"][0]["tipo"], "apartamento");
}

#[tokio::test]
async fn test_update_imovel_フィールド欠落は400() {
    // Given
    let sut = create_test_app(MockImovelRepository::with_imoveis(vec![seed_imovel()]));

    // When
    let response = sut
        .oneshot(json_request(Method::PUT, "/imoveis/1", r#"{"cidade": "Recife"}"#))
        .await
        .unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// --- DELETE /imoveis/delete/{id} ---

#[tokio::test]
async fn test_delete_imovel_200と削除メッセージを返す() {
    // Given
    let repository = MockImovelRepository::with_imoveis(vec![seed_imovel(), casa(2)]);
    let sut = create_test_app(repository.clone());

    // When
    let response = sut
        .oneshot(request(Method::DELETE, "/imoveis/delete/1"))
        .await
        .unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_string(response).await,
        r#"{"mensagem":"imovel deletado com sucesso"}"#
    );
    let ids: Vec<i64> = repository
        .snapshot()
        .iter()
        .map(|i| i.id().as_i64())
        .collect();
    assert_eq!(ids, vec![2]);
}

#[tokio::test]
async fn test_delete_imovel_存在しないidでも200() {
    // Given
    let sut = create_test_app(MockImovelRepository::new());

    // When
    let response = sut
        .oneshot(request(Method::DELETE, "/imoveis/delete/7"))
        .await
        .unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::OK);
}

// --- エラー系 ---

#[tokio::test]
async fn test_接続失敗はすべてのエンドポイントで500() {
    let cases = [
        request(Method::GET, "/imoveis"),
        request(Method::GET, "/imoveis/1"),
        request(Method::GET, "/imoveis/tipo/apartamento"),
        json_request(Method::POST, "/imoveis", VALID_BODY),
        json_request(Method::PUT, "/imoveis/1", VALID_BODY),
        request(Method::DELETE, "/imoveis/delete/1"),
    ];

    for req in cases {
        // Given
        let sut = create_test_app(MockImovelRepository::unreachable());
        let uri = req.uri().to_string();

        // When
        let response = sut.oneshot(req).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(
            body_string(response).await,
            r#"{"erro":"Erro ao conectar ao banco de dados"}"#,
            "{uri}"
        );
    }
}

#[tokio::test]
async fn test_sql実行失敗は汎用の500() {
    // Given
    let sut = create_test_app(FailingImovelRepository);

    // When
    let response = sut.oneshot(request(Method::GET, "/imoveis")).await.unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_string(response).await,
        r#"{"erro":"Erro interno do servidor"}"#
    );
}

#[tokio::test]
async fn test_未定義のルートは404() {
    // Given
    let sut = create_test_app(MockImovelRepository::new());

    // When
    let response = sut.oneshot(request(Method::GET, "/casas")).await.unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_string(response).await,
        r#"{"erro":"Recurso nao encontrado"}"#
    );
}

#[tokio::test]
async fn test_health_checkはデータベースに依存しない() {
    // Given
    let sut = create_test_app(MockImovelRepository::unreachable());

    // When
    let response = sut.oneshot(request(Method::GET, "/health")).await.unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}
