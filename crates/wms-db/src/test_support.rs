//! Shared fixtures for wms-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use chrono::NaiveDate;

    use crate::WmsDb;
    use crate::service::WmsService;

    /// Warehouse snapshot on 2025-03-10.
    ///
    /// - users: admin (perms 200/201/202, 203 revoked), pickers ana/luis/sofia
    ///   (sofia has no full name), an inactive picker, a blank-named picker,
    ///   checkers carla/mario, a user without login rights
    /// - orders: 100/101 pending, 102 in preparation with two sheets and
    ///   pallets, 103 prepared, 104/105/106 completed, 107 in preparation
    ///   without sheets
    pub const SEED: &str = r"
INSERT INTO usuarios (Id, Usuario, Password, NombreCompleto, Nombres, Apellidos, IdNivel, Activo, Entrada) VALUES
    (1, 'admin',   'admin123', 'Admin General',  NULL,    NULL,     1, 1, 1),
    (2, 'ana',     'pick1',    'Ana López',      'Ana',   'López',  3, 1, 1),
    (3, 'luis',    'pick2',    'Luis Ramos',     'Luis',  'Ramos',  3, 1, 1),
    (4, 'pedro',   'x',        'Pedro Inactivo', NULL,    NULL,     3, 0, 1),
    (5, 'carla',   'chk1',     'Carla Méndez',   NULL,    NULL,     4, 1, 1),
    (6, 'mario',   'chk2',     'Mario Díaz',     NULL,    NULL,     4, 1, 1),
    (7, 'noentry', 'x',        'Sin Entrada',    NULL,    NULL,     1, 1, 0),
    (8, 'blank',   'x',        '   ',            NULL,    NULL,     3, 1, 1),
    (9, 'sofia',   'x',        NULL,             'Sofía', 'Castro', 3, 1, 1);

INSERT INTO transacciones_sistema (IdUsuario, Codigo, Estado) VALUES
    (1, 200, 1), (1, 201, 1), (1, 202, 1), (1, 203, 0);

INSERT INTO departamentos (Id, Nombre) VALUES (1, 'Abarrotes'), (2, 'Bebidas');

INSERT INTO ubicacionesbodega (Id, Rack, Nivel, Descripcion) VALUES
    (1, 'A', 1, 'A-1'), (2, 'A', 2, 'A-2'), (3, 'B', 1, 'B-1');

INSERT INTO productos (Upc, Descripcion, IdUbicacionBodega) VALUES
    ('P1', 'Arroz', 2), ('P2', 'Frijol', 1), ('P3', 'Azúcar', 3), ('P4', 'Aceite', NULL);

INSERT INTO productospaquetes (UPCPaquete, Upc) VALUES
    ('PK1', 'P1'), ('PK2', 'P2'), ('PK3', 'P3'), ('PK4', 'P4');

INSERT INTO pedidostienda_bodega
    (IdPedidos, Fecha, NombreEmpresa, TotalCantidad, Departamento, Estado, NombreUsuario, Paginado, Nohojas, CantTarimas) VALUES
    (100, '2025-03-10 08:00:00', 'Tienda Centro',      41, 1,    4, NULL,  0, 0, 0),
    (101, '2025-03-09 09:00:00', 'Super La Torre',     12, 2,    4, NULL,  0, 0, 0),
    (102, '2025-03-10 07:00:00', 'Tienda Norte',       28, 1,    5, 'ana', 1, 2, 2),
    (103, '2025-03-10 10:00:00', 'Tienda Sur',         15, 2,    6, 'ana', 1, 1, 1),
    (104, '2025-03-10 06:00:00', 'Mayoreo Express',    50, 1,    7, NULL,  1, 2, 2),
    (105, '2025-03-09 06:00:00', 'Mayoreo Express',    20, 1,    7, NULL,  1, 1, 1),
    (106, '2025-03-08 06:00:00', 'Mayoreo Express',    20, 1,    7, NULL,  1, 1, 1),
    (107, '2025-03-10 05:00:00', 'Distribuidora Paiz', 9,  NULL, 5, NULL,  0, 0, 0);

INSERT INTO detallepedidostienda_bodega
    (Id, IdConsolidado, UPC, UPCProducto, Descripcion, Cantidad, CantConfirmada, EstadoPreparacionproducto, NoHoja, NoTarima, IdUsuariopreparo, Fechahorapreparo) VALUES
    (1001, 102, 'PK1', 'P1', 'Arroz',         10, 10,   5, 1,    1,    2,    '2025-03-10 09:00:00'),
    (1002, 102, 'PK2', 'P2', 'Frijol',        6,  5,    1, 1,    1,    2,    '2025-03-10 09:10:00'),
    (1003, 102, 'PK3', 'P3', 'Azúcar',        4,  NULL, 0, 2,    2,    NULL, NULL),
    (1004, 102, 'PK3', 'P3', 'Azúcar morena', 8,  8,    5, 2,    2,    3,    '2025-03-09 15:00:00'),
    (1005, 103, 'PK1', 'P1', 'Arroz',         15, 15,   5, 1,    1,    9,    '2025-03-10 11:00:00'),
    (1010, 100, 'PK1', 'P1', 'Arroz',         10, NULL, 0, NULL, NULL, NULL, NULL),
    (1011, 100, 'PK2', 'P2', 'Frijol',        5,  NULL, 0, NULL, NULL, NULL, NULL),
    (1012, 100, 'PK3', 'P3', 'Azúcar',        20, NULL, 0, NULL, NULL, NULL, NULL),
    (1013, 100, 'PK4', 'P4', 'Aceite',        5,  NULL, 0, NULL, NULL, NULL, NULL),
    (1014, 100, 'ZZZ', NULL, 'Sin paquete',   1,  NULL, 0, NULL, NULL, NULL, NULL);

INSERT INTO PreparacionPedidos
    (Idpreparo, IdPedido, NoHoja, Sucursal, TotalSKUs, TotalFardos, IdUsuario, FechaHoraInicio, FechaHorafinalizo) VALUES
    (500, 102, 1, 'Tienda Norte', 2, 16, 2,    '2025-03-10 08:30:00', NULL),
    (501, 102, 2, 'Tienda Norte', 2, 12, NULL, NULL,                  NULL),
    (502, 103, 1, 'Tienda Sur',   1, 15, 9,    '2025-03-10 10:30:00', '2025-03-10 11:30:00');

INSERT INTO TarimasInventario
    (IdTarima, IdPedido, NoTarima, FechaCreacion, FechaFinalizacion, CantidadFardos, CantidadSkus, IdUsuarioChequeo, FechaHoraInicio, FechaHoraFin) VALUES
    (700, 102, 1, '2025-03-10 09:30:00', '2025-03-10 09:45:00', 15, 2, 5,    NULL,                  NULL),
    (701, 102, 2, '2025-03-10 09:50:00', '2025-03-10 10:00:00', 12, 2, NULL, NULL,                  NULL),
    (702, 102, 3, '2025-03-10 10:05:00', NULL,                  0,  0, NULL, NULL,                  NULL),
    (703, 103, 1, '2025-03-10 11:05:00', '2025-03-10 11:20:00', 15, 1, 6,    '2025-03-10 11:25:00', '2025-03-10 11:40:00');
";

    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    /// Empty in-memory service with the schema applied.
    pub async fn test_service() -> WmsService {
        let db = WmsDb::open_local(":memory:", true).await.unwrap();
        WmsService::from_db(db)
    }

    /// In-memory service loaded with [`SEED`].
    pub async fn seeded_service() -> WmsService {
        let svc = test_service().await;
        exec(&svc, SEED).await;
        svc
    }

    pub async fn exec(svc: &WmsService, sql: &str) {
        svc.db().conn().execute_batch(sql).await.unwrap();
    }

    pub async fn scalar_i64(svc: &WmsService, sql: &str) -> i64 {
        let mut rows = svc.db().conn().query(sql, ()).await.unwrap();
        let row = rows.next().await.unwrap().unwrap();
        row.get::<Option<i64>>(0).unwrap().unwrap_or(0)
    }
}
