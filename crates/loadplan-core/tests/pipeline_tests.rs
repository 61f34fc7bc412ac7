//! End-to-end tests: uploaded bytes in, stored disciplines out

mod common;

use common::{docx_with_paragraphs, pdf_with_cmap_font, pdf_with_runs, percent_encode};
use loadplan_core::{InMemoryReportStore, LoadPlanService, PipelineError};
use pretty_assertions::assert_eq;
use shared_types::{DocumentKind, RawDocument, ReportStatus, StudyForm};

fn service() -> LoadPlanService<InMemoryReportStore> {
    LoadPlanService::with_default_grammar(InMemoryReportStore::new())
}

#[tokio::test]
async fn test_pdf_upload_to_parsed_report() {
    let service = service();
    let pdf = pdf_with_runs(&[
        &[
            "ПЛАН педагогічного навантаження",
            "Факультет",
            "Спеціальність",
            "Дисципліни",
            "Бази даних",
            "Ел.",
            "121-2",
            "25 16 0 4 0 0 3",
        ],
        &[
            "Всього за І семестр",
            "Схемотехніка",
            "Ел.",
            "122-3",
            "20 16 8 0 2 0 40 18 4 0 0 1 0 12",
        ],
    ]);
    let document = RawDocument::new("plan.pdf", DocumentKind::Pdf, pdf);

    let extracted = service.extract_and_store(document, "2025/2026").await.unwrap();
    assert!(extracted.text.contains("Бази даних Ел. 121-2 25 16 0 4 0 0 3 \n"));
    assert_eq!(extracted.file_name, "plan.pdf");

    let summary = service.parse_report(&extracted.report_id).await.unwrap();
    assert_eq!(summary.count, 3);

    let report = service.report(&extracted.report_id).await.unwrap();
    assert_eq!(report.status, ReportStatus::Parsed);
    assert_eq!(report.academic_year, "2025/2026");

    let records: Vec<_> = report.disciplines.iter().map(|d| &d.record).collect();
    assert_eq!(records[0].name, "Бази даних");
    assert_eq!(records[0].semester, 1);
    assert_eq!(records[0].total_hours, 1);

    // The second page's row begins at the boundary phrase itself
    assert_eq!(records[1].name, "Схемотехніка");
    assert_eq!(records[1].semester, 1);
    assert_eq!(records[1].study_form, StudyForm::FullTime);
    assert_eq!(records[1].total_hours, 40);
    assert_eq!(records[2].study_form, StudyForm::PartTime);
    assert_eq!(records[2].total_hours, 12);
}

#[tokio::test]
async fn test_percent_encoded_pdf_runs() {
    let service = service();
    let runs = [
        percent_encode("Дисципліни"),
        percent_encode("Основи електроніки"),
        percent_encode("Ел."),
        "121-1".to_string(),
        "30 16 0 8 0 0 2".to_string(),
    ];
    let runs: Vec<&str> = runs.iter().map(String::as_str).collect();
    let pdf = pdf_with_runs(&[&runs]);

    let extracted = service
        .extract_and_store(RawDocument::new("plan.pdf", DocumentKind::Pdf, pdf), "2025/2026")
        .await
        .unwrap();
    assert!(extracted.text.starts_with("Дисципліни Основи електроніки Ел. "));

    service.parse_report(&extracted.report_id).await.unwrap();
    let disciplines = service.disciplines(&extracted.report_id).await.unwrap();
    assert_eq!(disciplines.len(), 1);
    assert_eq!(disciplines[0].record.name, "Основи електроніки");
    assert_eq!(disciplines[0].record.course, 1);
    assert_eq!(disciplines[0].record.lectures, 16);
}

#[tokio::test]
async fn test_pdf_with_composite_font() {
    let service = service();
    let pdf = pdf_with_cmap_font(&[&[
        "Дисципліни",
        "Інженерна графіка",
        "Ел.",
        "121-1",
        "30 16 0 8 0 0 2",
    ]]);

    let extracted = service
        .extract_and_store(RawDocument::new("plan.pdf", DocumentKind::Pdf, pdf), "2025/2026")
        .await
        .unwrap();
    assert_eq!(
        extracted.text,
        "Дисципліни Інженерна графіка Ел. 121-1 30 16 0 8 0 0 2 \n"
    );

    service.parse_report(&extracted.report_id).await.unwrap();
    let disciplines = service.disciplines(&extracted.report_id).await.unwrap();
    assert_eq!(disciplines.len(), 1);
    assert_eq!(disciplines[0].record.name, "Інженерна графіка");
    assert_eq!(disciplines[0].record.course, 1);
    assert_eq!(disciplines[0].record.labs, 8);
}

#[tokio::test]
async fn test_results_serialize_camel_case() {
    let service = service();
    let pdf = pdf_with_runs(&[&["Фізика", "Ел.", "121-1", "30 16 0 8 0 0 2"]]);
    let extracted = service
        .extract_and_store(RawDocument::new("plan.pdf", DocumentKind::Pdf, pdf), "2025/2026")
        .await
        .unwrap();
    let summary = service.parse_report(&extracted.report_id).await.unwrap();

    let extracted_json = serde_json::to_value(&extracted).unwrap();
    assert_eq!(extracted_json["reportId"], extracted.report_id.as_str());
    assert_eq!(extracted_json["fileName"], "plan.pdf");
    assert!(extracted_json["text"].as_str().unwrap().starts_with("Фізика Ел. "));

    assert_eq!(
        serde_json::to_value(&summary).unwrap(),
        serde_json::json!({
            "reportId": extracted.report_id,
            "count": 1,
            "status": "PARSED",
        })
    );
}

#[tokio::test]
async fn test_docx_upload_to_parsed_report() {
    let service = service();
    let docx = docx_with_paragraphs(&[
        "Дисципліни",
        "Курсова робота з ТАУ",
        "Ел.",
        "121-3",
        "20 0 0 0 0 0 0",
        "Дипломне проєктування",
        "Ел.",
        "121-4",
        "12 0 0 0 0 0 0",
    ]);
    let document = RawDocument::new("plan.docx", DocumentKind::Word, docx);

    let extracted = service.extract_and_store(document, "2025/2026").await.unwrap();
    let summary = service.parse_report(&extracted.report_id).await.unwrap();
    assert_eq!(summary.count, 2);

    let report = service.report(&extracted.report_id).await.unwrap();
    let first = &report.disciplines[0].record;
    let second = &report.disciplines[1].record;
    assert_eq!(first.name, "Курсова робота з ТАУ");
    assert_eq!(first.course, 3);
    assert_eq!(first.course_works, 1);
    assert_eq!(second.name, "Дипломне проєктування");
    assert_eq!(second.thesis_works, 1);
    assert_eq!(second.course_works, 0);
}

#[tokio::test]
async fn test_document_without_rows() {
    let service = service();
    let pdf = pdf_with_runs(&[&["Розклад дзвінків", "08:30 - 09:50"]]);
    let extracted = service
        .extract_and_store(RawDocument::new("bells.pdf", DocumentKind::Pdf, pdf), "2025/2026")
        .await
        .unwrap();

    assert!(matches!(
        service.parse_report(&extracted.report_id).await,
        Err(PipelineError::NoRecordsFound)
    ));
    let report = service.report(&extracted.report_id).await.unwrap();
    assert_eq!(report.status, ReportStatus::Draft);
}

#[tokio::test]
async fn test_blank_pages_are_empty_text() {
    let service = service();
    let pdf = pdf_with_runs(&[&[], &[]]);
    let extracted = service
        .extract_and_store(RawDocument::new("blank.pdf", DocumentKind::Pdf, pdf), "2025/2026")
        .await
        .unwrap();
    assert_eq!(extracted.text, "\n\n");

    assert!(matches!(
        service.parse_report(&extracted.report_id).await,
        Err(PipelineError::EmptyText)
    ));
}

#[tokio::test]
async fn test_declared_type_must_match_content() {
    let service = service();
    let docx = docx_with_paragraphs(&["Бази даних"]);
    let result = service
        .extract_and_store(RawDocument::new("plan.pdf", DocumentKind::Pdf, docx), "2025/2026")
        .await;

    assert!(matches!(result, Err(PipelineError::Extraction(_))));
    assert!(service.reports().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_full_lifecycle() {
    let service = service();
    let pdf = pdf_with_runs(&[&["Фізика", "Ел.", "121-1", "30 16 0 8 0 0 2"]]);
    let extracted = service
        .extract_and_store(RawDocument::new("plan.pdf", DocumentKind::Pdf, pdf), "2025/2026")
        .await
        .unwrap();
    let id = extracted.report_id;

    service.parse_report(&id).await.unwrap();
    assert!(service.validate_report(&id).await.unwrap().valid);
    assert_eq!(service.report(&id).await.unwrap().status, ReportStatus::Validated);

    assert!(service.complete_report(&id).await.unwrap().success);
    assert_eq!(service.report(&id).await.unwrap().status, ReportStatus::Completed);

    assert!(matches!(
        service.parse_report(&id).await,
        Err(PipelineError::InvalidStatus { .. })
    ));
}
