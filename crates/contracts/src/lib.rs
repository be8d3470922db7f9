//! Общие DTO между backend и внешними клиентами сервиса синхронизации цен.

pub mod usecases;
