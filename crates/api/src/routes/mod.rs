pub mod analysis_result;
pub mod anomaly;
pub mod forms;
pub mod health;
pub mod inspection;
pub mod ml;
pub mod pdf;
pub mod thermal;
pub mod transformer;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /transformers                                    list, create
/// /transformers/{transformer_no}                   get
/// /transformers/{transformer_no}/inspections       list inspections
///
/// /inspections                                     list, create
/// /inspections/{id}                                get
/// /inspections/{id}/images                         list images
///
/// /images                                          upload (multipart)
/// /images/{id}                                     stream file
///
/// /general-records                                 create
/// /general-records/{id}                            get
/// /general-records/inspection/{inspection_id}      get by inspection
/// /maintenance-records/...                         same shape
/// /work-datasheets/...                             same shape
///
/// /ml/predict                                      thermal or single-image (JSON)
/// /ml/predict-image/{id}                           single-image on stored image
/// /ml/predict-upload                               single-image on upload
///
/// /thermal/analyze                                 two uploads
/// /thermal/analyze-by-ids                          two stored images
/// /thermal/analyze-with-baseline                   stored baseline + upload
///
/// /anomalies/insert                                bulk insert (POST)
/// /anomalies/delete                                hard (DELETE) / soft (PATCH)
/// /anomalies/by-id/{id}                            get
/// /anomalies/{inspection_number}                   list
///
/// /analysis-results                                save (POST)
/// /analysis-results/inspection/{id}                list
/// /analysis-results/inspection/{id}/boxes          list boxes
///
/// /pdf/generate                                    datasheet report (POST)
/// /pdf/generate/complete                           complete report (POST)
/// /pdf/generate/mock                               sample report
/// /pdf/generate/{id}                               stored datasheet report
/// /pdf/inspections/{inspection_id}                 stored complete report
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/transformers", transformer::router())
        .nest("/inspections", inspection::router())
        .merge(inspection::image_router())
        .nest("/general-records", forms::general_record_router())
        .nest("/maintenance-records", forms::maintenance_record_router())
        .nest("/work-datasheets", forms::work_datasheet_router())
        .nest("/ml", ml::router())
        .nest("/thermal", thermal::router())
        .nest("/anomalies", anomaly::router())
        .nest("/analysis-results", analysis_result::router())
        .nest("/pdf", pdf::router())
}
